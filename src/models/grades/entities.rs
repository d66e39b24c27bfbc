use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::define_string_enum;

define_string_enum! {
    pub enum LetterGrade("letter grade") {
        A => "A",
        B => "B",
        C => "C",
        D => "D",
        F => "F",
    }
}

impl LetterGrade {
    /// 百分制成绩对应的等级
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            LetterGrade::A
        } else if percentage >= 80.0 {
            LetterGrade::B
        } else if percentage >= 70.0 {
            LetterGrade::C
        } else if percentage >= 60.0 {
            LetterGrade::D
        } else {
            LetterGrade::F
        }
    }

    /// 4.0 绩点
    pub fn grade_points(&self) -> f64 {
        match self {
            LetterGrade::A => 4.0,
            LetterGrade::B => 3.0,
            LetterGrade::C => 2.0,
            LetterGrade::D => 1.0,
            LetterGrade::F => 0.0,
        }
    }
}

// 成绩
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grade {
    pub id: Uuid,
    pub enrollment_id: Uuid,
    pub assessment: String,
    pub score: f64,
    pub max_score: f64,
    pub weight: f64,
    pub letter_grade: LetterGrade,
    pub grade_points: f64,
    pub remarks: Option<String>,
    pub graded_by: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Grade {
    pub fn percentage(&self) -> f64 {
        percentage(self.score, self.max_score)
    }
}

pub fn percentage(score: f64, max_score: f64) -> f64 {
    if max_score <= 0.0 {
        0.0
    } else {
        score / max_score * 100.0
    }
}

/// 按权重加权的课程总评百分比，总权重为 0 时返回 None
pub fn weighted_percentage(grades: &[Grade]) -> Option<f64> {
    let total_weight: f64 = grades.iter().map(|g| g.weight).sum();
    if total_weight <= 0.0 {
        return None;
    }
    let weighted: f64 = grades.iter().map(|g| g.percentage() * g.weight).sum();
    Some(weighted / total_weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade(score: f64, max_score: f64, weight: f64) -> Grade {
        let letter = LetterGrade::from_percentage(percentage(score, max_score));
        Grade {
            id: Uuid::new_v4(),
            enrollment_id: Uuid::nil(),
            assessment: "quiz".into(),
            score,
            max_score,
            weight,
            grade_points: letter.grade_points(),
            letter_grade: letter,
            remarks: None,
            graded_by: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_letter_boundaries() {
        assert_eq!(LetterGrade::from_percentage(100.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_percentage(90.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_percentage(89.99), LetterGrade::B);
        assert_eq!(LetterGrade::from_percentage(80.0), LetterGrade::B);
        assert_eq!(LetterGrade::from_percentage(70.0), LetterGrade::C);
        assert_eq!(LetterGrade::from_percentage(60.0), LetterGrade::D);
        assert_eq!(LetterGrade::from_percentage(59.9), LetterGrade::F);
        assert_eq!(LetterGrade::from_percentage(0.0), LetterGrade::F);
    }

    #[test]
    fn test_grade_points() {
        assert_eq!(LetterGrade::A.grade_points(), 4.0);
        assert_eq!(LetterGrade::D.grade_points(), 1.0);
        assert_eq!(LetterGrade::F.grade_points(), 0.0);
    }

    #[test]
    fn test_weighted_percentage() {
        // 期中 40%（80 分），期末 60%（45/50 = 90 分）
        let grades = vec![grade(80.0, 100.0, 40.0), grade(45.0, 50.0, 60.0)];
        let pct = weighted_percentage(&grades).unwrap();
        assert!((pct - 86.0).abs() < 1e-9);

        assert!(weighted_percentage(&[]).is_none());
        assert!(weighted_percentage(&[grade(10.0, 10.0, 0.0)]).is_none());
    }
}
