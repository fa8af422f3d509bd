//! 预导入模块，方便使用

pub use super::activity_logs::{
    ActiveModel as ActivityLogActiveModel, Entity as ActivityLogs, Model as ActivityLogModel,
};
pub use super::attendance_events::{
    ActiveModel as AttendanceActiveModel, Entity as AttendanceEvents, Model as AttendanceModel,
};
pub use super::grades::{ActiveModel as GradeActiveModel, Entity as Grades, Model as GradeModel};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::subjects::{
    ActiveModel as SubjectActiveModel, Entity as Subjects, Model as SubjectModel,
};
