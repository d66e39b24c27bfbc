use serde::Serialize;
use uuid::Uuid;

use super::entities::Student;
use crate::models::courses::entities::Course;
use crate::models::enrollments::entities::{Enrollment, EnrollmentStatus};
use crate::models::grades::entities::{Grade, LetterGrade, weighted_percentage};

// 成绩单中的单门课程
#[derive(Debug, Clone, Serialize)]
pub struct TranscriptCourse {
    pub enrollment_id: Uuid,
    pub term_id: Uuid,
    pub course_id: Uuid,
    pub course_code: String,
    pub course_name: String,
    pub credits: i32,
    pub status: EnrollmentStatus,
    pub grades: Vec<Grade>,
    pub final_percentage: Option<f64>,
    pub letter_grade: Option<LetterGrade>,
    pub grade_points: Option<f64>,
}

// 成绩单
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    pub student: Student,
    pub courses: Vec<TranscriptCourse>,
    pub total_credits_attempted: i32,
    pub total_credits_completed: i32,
    /// 学分加权的 4.0 绩点，没有已评分课程时为 None
    pub gpa: Option<f64>,
}

impl Transcript {
    /// 由学生的选课记录和全部成绩汇总成绩单，已退课的记录不计入
    pub fn build(student: Student, enrollments: Vec<(Enrollment, Course)>, grades: &[Grade]) -> Self {
        let mut courses = Vec::new();
        let mut credits_attempted = 0;
        let mut credits_completed = 0;
        let mut weighted_points = 0.0;
        let mut graded_credits = 0;

        for (enrollment, course) in enrollments {
            if !enrollment.status.is_active() {
                continue;
            }
            let course_grades: Vec<Grade> = grades
                .iter()
                .filter(|g| g.enrollment_id == enrollment.id)
                .cloned()
                .collect();

            let final_percentage = weighted_percentage(&course_grades);
            let letter_grade = final_percentage.map(LetterGrade::from_percentage);
            let grade_points = letter_grade.map(|l| l.grade_points());

            credits_attempted += course.credits;
            if enrollment.status == EnrollmentStatus::Completed {
                credits_completed += course.credits;
            }
            if let Some(points) = grade_points {
                weighted_points += points * course.credits as f64;
                graded_credits += course.credits;
            }

            courses.push(TranscriptCourse {
                enrollment_id: enrollment.id,
                term_id: enrollment.term_id,
                course_id: course.id,
                course_code: course.code,
                course_name: course.name,
                credits: course.credits,
                status: enrollment.status,
                grades: course_grades,
                final_percentage,
                letter_grade,
                grade_points,
            });
        }

        let gpa = (graded_credits > 0)
            .then(|| (weighted_points / graded_credits as f64 * 100.0).round() / 100.0);

        Self {
            student,
            courses,
            total_credits_attempted: credits_attempted,
            total_credits_completed: credits_completed,
            gpa,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::courses::entities::CourseStatus;
    use crate::models::students::entities::StudentStatus;

    fn now() -> chrono::DateTime<chrono::Utc> {
        chrono::Utc::now()
    }

    fn student() -> Student {
        Student {
            id: Uuid::new_v4(),
            user_id: None,
            student_number: "S001".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            date_of_birth: None,
            gender: None,
            phone: None,
            address: None,
            department_id: None,
            enrollment_date: None,
            status: StudentStatus::Active,
            created_at: now(),
            updated_at: now(),
            deleted_at: None,
        }
    }

    fn course(code: &str, credits: i32) -> Course {
        Course {
            id: Uuid::new_v4(),
            code: code.into(),
            name: code.into(),
            description: None,
            credits,
            department_id: None,
            teacher_id: None,
            capacity: 30,
            status: CourseStatus::Active,
            created_at: now(),
            updated_at: now(),
            deleted_at: None,
        }
    }

    fn enrollment(student_id: Uuid, course_id: Uuid, status: EnrollmentStatus) -> Enrollment {
        Enrollment {
            id: Uuid::new_v4(),
            student_id,
            course_id,
            term_id: Uuid::nil(),
            status,
            enrolled_at: now(),
            dropped_at: None,
            completed_at: None,
            updated_at: now(),
        }
    }

    fn grade(enrollment_id: Uuid, score: f64) -> Grade {
        let letter = LetterGrade::from_percentage(score);
        Grade {
            id: Uuid::new_v4(),
            enrollment_id,
            assessment: "final".into(),
            score,
            max_score: 100.0,
            weight: 100.0,
            grade_points: letter.grade_points(),
            letter_grade: letter,
            remarks: None,
            graded_by: None,
            created_at: now(),
            updated_at: now(),
        }
    }

    #[test]
    fn test_credit_weighted_gpa() {
        let s = student();
        let math = course("MATH101", 4);
        let art = course("ART100", 2);
        let hist = course("HIST200", 3);
        let e_math = enrollment(s.id, math.id, EnrollmentStatus::Completed);
        let e_art = enrollment(s.id, art.id, EnrollmentStatus::Enrolled);
        let e_hist = enrollment(s.id, hist.id, EnrollmentStatus::Dropped);

        let grades = vec![grade(e_math.id, 92.0), grade(e_art.id, 75.0), grade(e_hist.id, 10.0)];
        let transcript = Transcript::build(
            s,
            vec![(e_math, math), (e_art, art), (e_hist, hist)],
            &grades,
        );

        // (4.0 * 4 + 2.0 * 2) / 6 = 3.33
        assert_eq!(transcript.gpa, Some(3.33));
        assert_eq!(transcript.courses.len(), 2);
        assert_eq!(transcript.total_credits_attempted, 6);
        assert_eq!(transcript.total_credits_completed, 4);
    }

    #[test]
    fn test_no_grades_means_no_gpa() {
        let s = student();
        let c = course("CS101", 3);
        let e = enrollment(s.id, c.id, EnrollmentStatus::Enrolled);
        let transcript = Transcript::build(s, vec![(e, c)], &[]);
        assert_eq!(transcript.gpa, None);
        assert_eq!(transcript.courses[0].letter_grade, None);
    }
}
