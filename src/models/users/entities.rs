use serde::{Deserialize, Serialize};

// 用户类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Teacher, // 教师
    Student, // 学生（当前学生不建 User 记录）
}

impl UserType {
    pub const TEACHER: &'static str = "teacher";
    pub const STUDENT: &'static str = "student";

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Teacher => Self::TEACHER,
            UserType::Student => Self::STUDENT,
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UserType::TEACHER => Ok(UserType::Teacher),
            UserType::STUDENT => Ok(UserType::Student),
            _ => Err(format!("Invalid user type: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub user_type: UserType,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
