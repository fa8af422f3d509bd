//! 看板聚合查询
//!
//! 只统计在读学生；退学学生的关联记录不参与任何聚合。

use std::collections::BTreeMap;

use super::{SeaOrmStorage, db_err};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::entity::{activity_logs, attendance_events, grades};
use crate::errors::Result;
use crate::models::{
    dashboard::{
        entities::StudentAggregate,
        requests::SemesterQueryParams,
        responses::{DashboardTotals, SemesterBreakdown},
    },
    grades::entities::Semester,
    students::{entities::StudentStatus, responses::SubjectAverage},
};
use sea_orm::{
    ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};
use tracing::warn;

impl SeaOrmStorage {
    /// 各项记录数量
    pub async fn dashboard_totals_impl(&self) -> Result<DashboardTotals> {
        let students = Students::find()
            .filter(StudentColumn::Status.eq(StudentStatus::ACTIVE))
            .count(&self.db)
            .await
            .map_err(db_err("统计学生数量失败"))?;
        let subjects = Subjects::find()
            .count(&self.db)
            .await
            .map_err(db_err("统计科目数量失败"))?;
        let grades = Self::visible_grades()
            .count(&self.db)
            .await
            .map_err(db_err("统计成绩数量失败"))?;
        let attendance_events = Self::visible_attendance()
            .count(&self.db)
            .await
            .map_err(db_err("统计考勤数量失败"))?;
        let activities = Self::visible_activities()
            .count(&self.db)
            .await
            .map_err(db_err("统计活动数量失败"))?;

        Ok(DashboardTotals {
            students: students as i64,
            subjects: subjects as i64,
            grades: grades as i64,
            attendance_events: attendance_events as i64,
            activities: activities as i64,
        })
    }

    /// 每个在读学生的原始汇总，按学生 ID 升序
    pub async fn student_aggregates_impl(&self) -> Result<Vec<StudentAggregate>> {
        let students: Vec<(i64, String, Option<String>)> = Students::find()
            .filter(StudentColumn::Status.eq(StudentStatus::ACTIVE))
            .select_only()
            .column(StudentColumn::Id)
            .column(StudentColumn::Name)
            .column(StudentColumn::Discipline)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err("查询学生汇总失败"))?;

        let mut aggregates: BTreeMap<i64, StudentAggregate> = students
            .into_iter()
            .map(|(student_id, name, discipline)| {
                (
                    student_id,
                    StudentAggregate {
                        student_id,
                        name,
                        discipline,
                        grade_count: 0,
                        grade_sum: 0.0,
                        attendance_total: 0,
                        attendance_present: 0,
                        activity_categories: Vec::new(),
                    },
                )
            })
            .collect();

        let scores: Vec<(i64, f64)> = Self::visible_grades()
            .select_only()
            .column(grades::Column::StudentId)
            .column(grades::Column::Score)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err("查询成绩汇总失败"))?;
        for (student_id, score) in scores {
            if let Some(agg) = aggregates.get_mut(&student_id) {
                agg.grade_count += 1;
                agg.grade_sum += score;
            }
        }

        let presence: Vec<(i64, bool)> = Self::visible_attendance()
            .select_only()
            .column(attendance_events::Column::StudentId)
            .column(attendance_events::Column::Present)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err("查询考勤汇总失败"))?;
        for (student_id, present) in presence {
            if let Some(agg) = aggregates.get_mut(&student_id) {
                agg.attendance_total += 1;
                if present {
                    agg.attendance_present += 1;
                }
            }
        }

        let categories: Vec<(i64, Option<String>)> = Self::visible_activities()
            .select_only()
            .column(activity_logs::Column::StudentId)
            .column(activity_logs::Column::Category)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err("查询活动汇总失败"))?;
        for (student_id, category) in categories {
            if let Some(agg) = aggregates.get_mut(&student_id) {
                agg.activity_categories.push(category);
            }
        }

        Ok(aggregates.into_values().collect())
    }

    /// 按学期分组的成绩统计，按学期顺序返回
    pub async fn semester_breakdown_impl(
        &self,
        params: SemesterQueryParams,
    ) -> Result<Vec<SemesterBreakdown>> {
        let mut select = Self::visible_grades();

        if let Some(student_id) = params.student_id {
            select = select.filter(grades::Column::StudentId.eq(student_id));
        }
        if let Some(subject_id) = params.subject_id {
            select = select.filter(grades::Column::SubjectId.eq(subject_id));
        }
        if let Some(discipline) = params.discipline.as_deref().map(str::trim)
            && !discipline.is_empty()
        {
            select = select.filter(StudentColumn::Discipline.eq(discipline));
        }

        let rows: Vec<(String, i64, Option<f64>, Option<f64>, Option<f64>)> = select
            .select_only()
            .column(grades::Column::Semester)
            .column_as(grades::Column::Id.count(), "count")
            .column_as(grades::Column::Score.sum(), "total")
            .column_as(grades::Column::Score.min(), "min_score")
            .column_as(grades::Column::Score.max(), "max_score")
            .group_by(grades::Column::Semester)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err("查询学期统计失败"))?;

        let mut items: Vec<SemesterBreakdown> = rows
            .into_iter()
            .filter_map(|(semester, count, total, min, max)| {
                let semester = match semester.parse::<Semester>() {
                    Ok(s) => s,
                    Err(e) => {
                        warn!("Skipping grades with unknown semester: {}", e);
                        return None;
                    }
                };
                (count > 0).then(|| SemesterBreakdown {
                    semester,
                    count,
                    average: total.unwrap_or_default() / count as f64,
                    min: min.unwrap_or_default(),
                    max: max.unwrap_or_default(),
                })
            })
            .collect();
        items.sort_by_key(|item| item.semester);

        Ok(items)
    }

    /// 单个学生各科目平均分
    pub async fn subject_averages_impl(&self, student_id: i64) -> Result<Vec<SubjectAverage>> {
        let rows: Vec<(i64, String, String, i64, Option<f64>)> = Self::visible_grades()
            .join(JoinType::InnerJoin, grades::Relation::Subject.def())
            .filter(grades::Column::StudentId.eq(student_id))
            .select_only()
            .column(grades::Column::SubjectId)
            .column(SubjectColumn::Code)
            .column(SubjectColumn::Name)
            .column_as(grades::Column::Id.count(), "count")
            .column_as(grades::Column::Score.sum(), "total")
            .group_by(grades::Column::SubjectId)
            .group_by(SubjectColumn::Code)
            .group_by(SubjectColumn::Name)
            .order_by_asc(SubjectColumn::Code)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err("查询科目平均分失败"))?;

        Ok(rows
            .into_iter()
            .filter(|(_, _, _, count, _)| *count > 0)
            .map(|(subject_id, code, name, count, total)| SubjectAverage {
                subject_id,
                subject_code: code,
                subject_name: name,
                count,
                average: total.unwrap_or_default() / count as f64,
            })
            .collect())
    }
}
