use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::editor::fields::{code, decimal, epoch_millis, flag, lenient_code, text};
use crate::editor::{FieldSet, NestedRecord, OrderedCollection};
use crate::models::attachment::Attachment;
use crate::models::{blank_record, section_record, visible_by_default};

// ────────────────────────────────────────────────────────────────────────────
// Category codes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Contract,
    Intern,
    Freelance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Degree {
    HighSchool,
    Associate,
    Bachelor,
    Master,
    Doctor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityCategory {
    ExternalActivity,
    Club,
    Volunteer,
    Award,
    Certificate,
    Training,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LanguageProficiency {
    Native,
    Fluent,
    Business,
    Conversational,
    Basic,
}

// ────────────────────────────────────────────────────────────────────────────
// Careers
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Career {
    pub id: Option<i64>,
    pub priority: i32,
    #[serde(default = "visible_by_default")]
    pub is_visible: bool,
    pub company_name: String,
    pub department: String,
    pub position: String,
    #[serde(deserialize_with = "lenient_code")]
    pub employment_type: Option<EmploymentType>,
    pub started_at: Option<i64>,
    pub ended_at: Option<i64>,
    pub is_working: bool,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CareerField {
    IsVisible,
    CompanyName,
    Department,
    Position,
    EmploymentType,
    StartedAt,
    EndedAt,
    IsWorking,
    Description,
}

impl FieldSet for Career {
    type Field = CareerField;

    fn set_field(&mut self, field: CareerField, value: &Value) {
        match field {
            CareerField::IsVisible => self.is_visible = flag(value),
            CareerField::CompanyName => self.company_name = text(value),
            CareerField::Department => self.department = text(value),
            CareerField::Position => self.position = text(value),
            CareerField::EmploymentType => self.employment_type = code(value),
            CareerField::StartedAt => self.started_at = epoch_millis(value),
            CareerField::EndedAt => self.ended_at = epoch_millis(value),
            CareerField::IsWorking => {
                self.is_working = flag(value);
                // A current position has no end date.
                if self.is_working {
                    self.ended_at = None;
                }
            }
            CareerField::Description => self.description = text(value),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Educations
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: Option<i64>,
    pub priority: i32,
    #[serde(default = "visible_by_default")]
    pub is_visible: bool,
    pub school_name: String,
    pub major: String,
    #[serde(deserialize_with = "lenient_code")]
    pub degree: Option<Degree>,
    pub gpa: Option<f64>,
    pub max_gpa: Option<f64>,
    pub started_at: Option<i64>,
    pub ended_at: Option<i64>,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EducationField {
    IsVisible,
    SchoolName,
    Major,
    Degree,
    Gpa,
    MaxGpa,
    StartedAt,
    EndedAt,
    Description,
}

impl FieldSet for Education {
    type Field = EducationField;

    fn set_field(&mut self, field: EducationField, value: &Value) {
        match field {
            EducationField::IsVisible => self.is_visible = flag(value),
            EducationField::SchoolName => self.school_name = text(value),
            EducationField::Major => self.major = text(value),
            EducationField::Degree => self.degree = code(value),
            EducationField::Gpa => self.gpa = decimal(value),
            EducationField::MaxGpa => self.max_gpa = decimal(value),
            EducationField::StartedAt => self.started_at = epoch_millis(value),
            EducationField::EndedAt => self.ended_at = epoch_millis(value),
            EducationField::Description => self.description = text(value),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Projects
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: Option<i64>,
    pub priority: i32,
    #[serde(default = "visible_by_default")]
    pub is_visible: bool,
    pub title: String,
    pub organization: String,
    pub role: String,
    pub started_at: Option<i64>,
    pub ended_at: Option<i64>,
    pub url: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectField {
    IsVisible,
    Title,
    Organization,
    Role,
    StartedAt,
    EndedAt,
    Url,
    Description,
}

impl FieldSet for Project {
    type Field = ProjectField;

    fn set_field(&mut self, field: ProjectField, value: &Value) {
        match field {
            ProjectField::IsVisible => self.is_visible = flag(value),
            ProjectField::Title => self.title = text(value),
            ProjectField::Organization => self.organization = text(value),
            ProjectField::Role => self.role = text(value),
            ProjectField::StartedAt => self.started_at = epoch_millis(value),
            ProjectField::EndedAt => self.ended_at = epoch_millis(value),
            ProjectField::Url => self.url = text(value),
            ProjectField::Description => self.description = text(value),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Activities
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Activity {
    pub id: Option<i64>,
    pub priority: i32,
    #[serde(default = "visible_by_default")]
    pub is_visible: bool,
    pub title: String,
    pub organization: String,
    #[serde(deserialize_with = "lenient_code")]
    pub category: Option<ActivityCategory>,
    pub started_at: Option<i64>,
    pub ended_at: Option<i64>,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityField {
    IsVisible,
    Title,
    Organization,
    Category,
    StartedAt,
    EndedAt,
    Description,
}

impl FieldSet for Activity {
    type Field = ActivityField;

    fn set_field(&mut self, field: ActivityField, value: &Value) {
        match field {
            ActivityField::IsVisible => self.is_visible = flag(value),
            ActivityField::Title => self.title = text(value),
            ActivityField::Organization => self.organization = text(value),
            ActivityField::Category => self.category = code(value),
            ActivityField::StartedAt => self.started_at = epoch_millis(value),
            ActivityField::EndedAt => self.ended_at = epoch_millis(value),
            ActivityField::Description => self.description = text(value),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Language skills and their test scores
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LanguageTest {
    pub id: Option<i64>,
    pub priority: i32,
    #[serde(default = "visible_by_default")]
    pub is_visible: bool,
    pub test_name: String,
    /// Kept as text: scores mix numbers and grades ("905", "IH", "N1").
    pub score: String,
    pub acquired_at: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LanguageTestField {
    IsVisible,
    TestName,
    Score,
    AcquiredAt,
}

impl FieldSet for LanguageTest {
    type Field = LanguageTestField;

    fn set_field(&mut self, field: LanguageTestField, value: &Value) {
        match field {
            LanguageTestField::IsVisible => self.is_visible = flag(value),
            LanguageTestField::TestName => self.test_name = text(value),
            LanguageTestField::Score => self.score = text(value),
            LanguageTestField::AcquiredAt => self.acquired_at = epoch_millis(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LanguageSkill {
    pub id: Option<i64>,
    pub priority: i32,
    #[serde(default = "visible_by_default")]
    pub is_visible: bool,
    pub language: String,
    #[serde(deserialize_with = "lenient_code")]
    pub proficiency: Option<LanguageProficiency>,
    pub language_tests: OrderedCollection<LanguageTest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LanguageSkillField {
    IsVisible,
    Language,
    Proficiency,
}

impl FieldSet for LanguageSkill {
    type Field = LanguageSkillField;

    fn set_field(&mut self, field: LanguageSkillField, value: &Value) {
        match field {
            LanguageSkillField::IsVisible => self.is_visible = flag(value),
            LanguageSkillField::Language => self.language = text(value),
            LanguageSkillField::Proficiency => self.proficiency = code(value),
        }
    }
}

impl NestedRecord for LanguageSkill {
    type Child = LanguageTest;

    fn children(&self) -> &OrderedCollection<LanguageTest> {
        &self.language_tests
    }

    fn set_children(&mut self, children: OrderedCollection<LanguageTest>) {
        self.language_tests = children;
    }
}

section_record!(Career, Education, Project, Activity, LanguageTest, LanguageSkill);

blank_record!(Career, Education, Project, Activity, LanguageTest, LanguageSkill);

// ────────────────────────────────────────────────────────────────────────────
// Document shapes
// ────────────────────────────────────────────────────────────────────────────

/// Scalar fields of a resume, shared by the detail, the draft and the
/// upsert request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeHeader {
    pub title: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub job_category: String,
    pub introduction: String,
    pub is_default: bool,
    pub is_public: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResumeHeaderField {
    Title,
    Name,
    Email,
    PhoneNumber,
    JobCategory,
    Introduction,
    IsDefault,
    IsPublic,
}

impl FieldSet for ResumeHeader {
    type Field = ResumeHeaderField;

    fn set_field(&mut self, field: ResumeHeaderField, value: &Value) {
        match field {
            ResumeHeaderField::Title => self.title = text(value),
            ResumeHeaderField::Name => self.name = text(value),
            ResumeHeaderField::Email => self.email = text(value),
            ResumeHeaderField::PhoneNumber => self.phone_number = text(value),
            ResumeHeaderField::JobCategory => self.job_category = text(value),
            ResumeHeaderField::Introduction => self.introduction = text(value),
            ResumeHeaderField::IsDefault => self.is_default = flag(value),
            ResumeHeaderField::IsPublic => self.is_public = flag(value),
        }
    }
}

/// A resume as delivered by the persistence backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDetail {
    pub id: Option<i64>,
    #[serde(flatten)]
    pub header: ResumeHeader,
    pub careers: Vec<Career>,
    pub educations: Vec<Education>,
    pub projects: Vec<Project>,
    pub activities: Vec<Activity>,
    pub language_skills: Vec<LanguageSkill>,
    pub attachments: Vec<Attachment>,
    pub updated_at: Option<i64>,
}

/// The single save payload for a resume. Every section array is dense and
/// index-ordered at the moment it is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeUpsertRequest {
    #[serde(flatten)]
    pub header: ResumeHeader,
    pub careers: Vec<Career>,
    pub educations: Vec<Education>,
    pub projects: Vec<Project>,
    pub activities: Vec<Activity>,
    pub language_skills: Vec<LanguageSkill>,
    pub attachments: Vec<Attachment>,
}
