//! 综合评分计算
//!
//! 学业成绩、课外活动与出勤按权重合成综合成绩，并换算为字母等级。

use crate::config::GradingConfig;
use crate::models::dashboard::entities::StudentAggregate;
use crate::models::dashboard::responses::ScoreCard;

/// 没有可识别活动时的课外活动分
pub const DEFAULT_COCURRICULAR_SCORE: f64 = 75.0;
/// 没有考勤记录时的出勤分
pub const DEFAULT_ATTENDANCE_SCORE: f64 = 80.0;

// 分数下限到等级，按从高到低排列
const LETTER_SCALE: [(f64, &str); 11] = [
    (95.0, "A+"),
    (90.0, "A"),
    (85.0, "A-"),
    (80.0, "B+"),
    (75.0, "B"),
    (70.0, "B-"),
    (65.0, "C+"),
    (60.0, "C"),
    (55.0, "C-"),
    (50.0, "D+"),
    (45.0, "D"),
];

/// 等级分布输出顺序
pub const LETTER_GRADES: [&str; 12] = [
    "A+", "A", "A-", "B+", "B", "B-", "C+", "C", "C-", "D+", "D", "F",
];

pub fn letter_grade(score: f64) -> &'static str {
    LETTER_SCALE
        .iter()
        .find(|(min, _)| score >= *min)
        .map(|(_, grade)| *grade)
        .unwrap_or("F")
}

/// 课外活动类别得分，未知类别返回 None
pub fn category_score(category: &str) -> Option<f64> {
    let score = match category.trim().to_ascii_uppercase().as_str() {
        "MUSIC" => 90.0,
        "DRAMA" => 85.0,
        "SPORTS" => 95.0,
        "ART" => 88.0,
        "DESIGN" | "DESIGNING" => 86.0,
        "DANCE" => 87.0,
        "ATHLETE" => 95.0,
        "DEBATE" => 92.0,
        "LITERATURE" => 89.0,
        _ => return None,
    };
    Some(score)
}

/// 课外活动得分：类别可用逗号并列（如 "DRAMA,SPORTS"），每个已知类别各计一次后取平均
pub fn cocurricular_score(categories: &[Option<String>]) -> f64 {
    let known: Vec<f64> = categories
        .iter()
        .flatten()
        .flat_map(|c| c.split(','))
        .filter_map(category_score)
        .collect();
    if known.is_empty() {
        DEFAULT_COCURRICULAR_SCORE
    } else {
        known.iter().sum::<f64>() / known.len() as f64
    }
}

pub fn attendance_score(present: i64, total: i64) -> f64 {
    if total <= 0 {
        DEFAULT_ATTENDANCE_SCORE
    } else {
        present as f64 / total as f64 * 100.0
    }
}

pub fn academic_score(grade_sum: f64, grade_count: i64) -> Option<f64> {
    (grade_count > 0).then(|| grade_sum / grade_count as f64)
}

/// 归一化后的权重，三者之和为 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeWeights {
    pub academic: f64,
    pub cocurricular: f64,
    pub attendance: f64,
}

impl Default for GradeWeights {
    fn default() -> Self {
        Self {
            academic: 0.6,
            cocurricular: 0.2,
            attendance: 0.2,
        }
    }
}

impl GradeWeights {
    /// 负数按 0 处理；总和不为正时回退到默认权重
    pub fn normalized(academic: f64, cocurricular: f64, attendance: f64) -> Self {
        let clean = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
        let (a, c, t) = (clean(academic), clean(cocurricular), clean(attendance));
        let total = a + c + t;
        if total <= 0.0 {
            return Self::default();
        }
        Self {
            academic: a / total,
            cocurricular: c / total,
            attendance: t / total,
        }
    }

    pub fn from_config(config: &GradingConfig) -> Self {
        Self::normalized(
            config.academic_weight,
            config.cocurricular_weight,
            config.attendance_weight,
        )
    }

    pub fn overall(&self, academic: f64, cocurricular: f64, attendance: f64) -> f64 {
        academic * self.academic + cocurricular * self.cocurricular + attendance * self.attendance
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 计算单个学生的评分卡；没有成绩的学生没有综合成绩
pub fn score_card(aggregate: &StudentAggregate, weights: &GradeWeights) -> ScoreCard {
    let academic = academic_score(aggregate.grade_sum, aggregate.grade_count);
    let cocurricular = cocurricular_score(&aggregate.activity_categories);
    let attendance = attendance_score(aggregate.attendance_present, aggregate.attendance_total);
    let overall = academic.map(|a| weights.overall(a, cocurricular, attendance));

    ScoreCard {
        academic: academic.map(round2),
        cocurricular: round2(cocurricular),
        attendance: round2(attendance),
        overall: overall.map(round2),
        academic_grade: academic.map(|a| letter_grade(a).to_string()),
        overall_grade: overall.map(|o| letter_grade(o).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_grade_boundaries() {
        assert_eq!(letter_grade(100.0), "A+");
        assert_eq!(letter_grade(95.0), "A+");
        assert_eq!(letter_grade(94.99), "A");
        assert_eq!(letter_grade(90.0), "A");
        assert_eq!(letter_grade(85.0), "A-");
        assert_eq!(letter_grade(80.0), "B+");
        assert_eq!(letter_grade(75.0), "B");
        assert_eq!(letter_grade(70.0), "B-");
        assert_eq!(letter_grade(65.0), "C+");
        assert_eq!(letter_grade(60.0), "C");
        assert_eq!(letter_grade(55.0), "C-");
        assert_eq!(letter_grade(50.0), "D+");
        assert_eq!(letter_grade(45.0), "D");
        assert_eq!(letter_grade(44.99), "F");
        assert_eq!(letter_grade(0.0), "F");
    }

    #[test]
    fn test_weights_are_normalized() {
        let w = GradeWeights::normalized(3.0, 1.0, 1.0);
        assert!((w.academic - 0.6).abs() < 1e-9);
        assert!((w.cocurricular - 0.2).abs() < 1e-9);
        assert!((w.academic + w.cocurricular + w.attendance - 1.0).abs() < 1e-9);

        assert_eq!(GradeWeights::normalized(0.0, 0.0, 0.0), GradeWeights::default());
        assert_eq!(GradeWeights::normalized(-1.0, f64::NAN, 0.0), GradeWeights::default());

        let only_academic = GradeWeights::normalized(2.0, -5.0, 0.0);
        assert_eq!(only_academic.academic, 1.0);
        assert_eq!(only_academic.cocurricular, 0.0);
    }

    #[test]
    fn test_cocurricular_score() {
        assert_eq!(cocurricular_score(&[]), DEFAULT_COCURRICULAR_SCORE);
        assert_eq!(
            cocurricular_score(&[None, Some("knitting".to_string())]),
            DEFAULT_COCURRICULAR_SCORE
        );
        let categories = vec![
            Some("sports".to_string()),
            Some("MUSIC".to_string()),
            Some("unknown".to_string()),
        ];
        assert_eq!(cocurricular_score(&categories), 92.5);
    }

    #[test]
    fn test_cocurricular_score_splits_combined_categories() {
        assert_eq!(
            cocurricular_score(&[Some("DRAMA,SPORTS".to_string())]),
            90.0
        );
        assert_eq!(
            cocurricular_score(&[Some(" drama , knitting ".to_string())]),
            85.0
        );
        assert_eq!(
            cocurricular_score(&[Some("MUSIC".to_string()), Some("ART,DEBATE".to_string())]),
            90.0
        );
        assert_eq!(cocurricular_score(&[Some(",".to_string())]), DEFAULT_COCURRICULAR_SCORE);
    }

    #[test]
    fn test_attendance_score() {
        assert_eq!(attendance_score(0, 0), DEFAULT_ATTENDANCE_SCORE);
        assert_eq!(attendance_score(3, 4), 75.0);
        assert_eq!(attendance_score(0, 5), 0.0);
    }

    #[test]
    fn test_score_card() {
        let aggregate = StudentAggregate {
            student_id: 1,
            name: "Asha".to_string(),
            discipline: Some("Science".to_string()),
            grade_count: 2,
            grade_sum: 180.0,
            attendance_total: 10,
            attendance_present: 9,
            activity_categories: vec![Some("SPORTS".to_string())],
        };
        let card = score_card(&aggregate, &GradeWeights::default());
        assert_eq!(card.academic, Some(90.0));
        assert_eq!(card.cocurricular, 95.0);
        assert_eq!(card.attendance, 90.0);
        // 90*0.6 + 95*0.2 + 90*0.2 = 91
        assert_eq!(card.overall, Some(91.0));
        assert_eq!(card.overall_grade.as_deref(), Some("A"));
    }

    #[test]
    fn test_score_card_without_grades() {
        let aggregate = StudentAggregate {
            student_id: 2,
            name: "Ravi".to_string(),
            discipline: None,
            grade_count: 0,
            grade_sum: 0.0,
            attendance_total: 0,
            attendance_present: 0,
            activity_categories: vec![],
        };
        let card = score_card(&aggregate, &GradeWeights::default());
        assert_eq!(card.academic, None);
        assert_eq!(card.overall, None);
        assert_eq!(card.cocurricular, DEFAULT_COCURRICULAR_SCORE);
        assert_eq!(card.attendance, DEFAULT_ATTENDANCE_SCORE);
    }
}
