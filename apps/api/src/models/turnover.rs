//! Turn-over (job change) journal: checklists, memos, self-introductions,
//! interview questions and job applications with their stages.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::editor::fields::{code, epoch_millis, flag, lenient_code, text};
use crate::editor::{FieldSet, NestedRecord, OrderedCollection};
use crate::models::{blank_record, section_record, visible_by_default};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    NotApplied,
    Applied,
    InProgress,
    Passed,
    Failed,
    Withdrawn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StageProcess {
    Document,
    CodingTest,
    Assignment,
    Interview,
    Etc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StageStatus {
    Waiting,
    Pass,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Checklist {
    pub id: Option<i64>,
    pub priority: i32,
    #[serde(default = "visible_by_default")]
    pub is_visible: bool,
    pub content: String,
    pub is_checked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChecklistField {
    IsVisible,
    Content,
    IsChecked,
}

impl FieldSet for Checklist {
    type Field = ChecklistField;

    fn set_field(&mut self, field: ChecklistField, value: &Value) {
        match field {
            ChecklistField::IsVisible => self.is_visible = flag(value),
            ChecklistField::Content => self.content = text(value),
            ChecklistField::IsChecked => self.is_checked = flag(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Memo {
    pub id: Option<i64>,
    pub priority: i32,
    #[serde(default = "visible_by_default")]
    pub is_visible: bool,
    pub title: String,
    pub content: String,
}

/// Title/content fields shared by memos and self-introductions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoteField {
    IsVisible,
    Title,
    Content,
}

impl FieldSet for Memo {
    type Field = NoteField;

    fn set_field(&mut self, field: NoteField, value: &Value) {
        match field {
            NoteField::IsVisible => self.is_visible = flag(value),
            NoteField::Title => self.title = text(value),
            NoteField::Content => self.content = text(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelfIntroduction {
    pub id: Option<i64>,
    pub priority: i32,
    #[serde(default = "visible_by_default")]
    pub is_visible: bool,
    pub title: String,
    pub content: String,
}

impl FieldSet for SelfIntroduction {
    type Field = NoteField;

    fn set_field(&mut self, field: NoteField, value: &Value) {
        match field {
            NoteField::IsVisible => self.is_visible = flag(value),
            NoteField::Title => self.title = text(value),
            NoteField::Content => self.content = text(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InterviewQuestion {
    pub id: Option<i64>,
    pub priority: i32,
    #[serde(default = "visible_by_default")]
    pub is_visible: bool,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InterviewQuestionField {
    IsVisible,
    Question,
    Answer,
}

impl FieldSet for InterviewQuestion {
    type Field = InterviewQuestionField;

    fn set_field(&mut self, field: InterviewQuestionField, value: &Value) {
        match field {
            InterviewQuestionField::IsVisible => self.is_visible = flag(value),
            InterviewQuestionField::Question => self.question = text(value),
            InterviewQuestionField::Answer => self.answer = text(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationStage {
    pub id: Option<i64>,
    pub priority: i32,
    #[serde(default = "visible_by_default")]
    pub is_visible: bool,
    #[serde(deserialize_with = "lenient_code")]
    pub process: Option<StageProcess>,
    pub scheduled_at: Option<i64>,
    #[serde(deserialize_with = "lenient_code")]
    pub status: Option<StageStatus>,
    pub memo: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApplicationStageField {
    IsVisible,
    Process,
    ScheduledAt,
    Status,
    Memo,
}

impl FieldSet for ApplicationStage {
    type Field = ApplicationStageField;

    fn set_field(&mut self, field: ApplicationStageField, value: &Value) {
        match field {
            ApplicationStageField::IsVisible => self.is_visible = flag(value),
            ApplicationStageField::Process => self.process = code(value),
            ApplicationStageField::ScheduledAt => self.scheduled_at = epoch_millis(value),
            ApplicationStageField::Status => self.status = code(value),
            ApplicationStageField::Memo => self.memo = text(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobApplication {
    pub id: Option<i64>,
    pub priority: i32,
    #[serde(default = "visible_by_default")]
    pub is_visible: bool,
    pub company_name: String,
    pub position: String,
    pub application_source: String,
    #[serde(deserialize_with = "lenient_code")]
    pub status: Option<ApplicationStatus>,
    pub applied_at: Option<i64>,
    pub closed_at: Option<i64>,
    pub link: String,
    pub memo: String,
    pub application_stages: OrderedCollection<ApplicationStage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JobApplicationField {
    IsVisible,
    CompanyName,
    Position,
    ApplicationSource,
    Status,
    AppliedAt,
    ClosedAt,
    Link,
    Memo,
}

impl FieldSet for JobApplication {
    type Field = JobApplicationField;

    fn set_field(&mut self, field: JobApplicationField, value: &Value) {
        match field {
            JobApplicationField::IsVisible => self.is_visible = flag(value),
            JobApplicationField::CompanyName => self.company_name = text(value),
            JobApplicationField::Position => self.position = text(value),
            JobApplicationField::ApplicationSource => self.application_source = text(value),
            JobApplicationField::Status => self.status = code(value),
            JobApplicationField::AppliedAt => self.applied_at = epoch_millis(value),
            JobApplicationField::ClosedAt => self.closed_at = epoch_millis(value),
            JobApplicationField::Link => self.link = text(value),
            JobApplicationField::Memo => self.memo = text(value),
        }
    }
}

impl NestedRecord for JobApplication {
    type Child = ApplicationStage;

    fn children(&self) -> &OrderedCollection<ApplicationStage> {
        &self.application_stages
    }

    fn set_children(&mut self, children: OrderedCollection<ApplicationStage>) {
        self.application_stages = children;
    }
}

section_record!(
    Checklist,
    Memo,
    SelfIntroduction,
    InterviewQuestion,
    ApplicationStage,
    JobApplication,
);

blank_record!(
    Checklist,
    Memo,
    SelfIntroduction,
    InterviewQuestion,
    ApplicationStage,
    JobApplication,
);

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TurnOverHeader {
    pub title: String,
    pub reason: String,
    pub started_at: Option<i64>,
    pub ended_at: Option<i64>,
    pub is_finished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TurnOverHeaderField {
    Title,
    Reason,
    StartedAt,
    EndedAt,
    IsFinished,
}

impl FieldSet for TurnOverHeader {
    type Field = TurnOverHeaderField;

    fn set_field(&mut self, field: TurnOverHeaderField, value: &Value) {
        match field {
            TurnOverHeaderField::Title => self.title = text(value),
            TurnOverHeaderField::Reason => self.reason = text(value),
            TurnOverHeaderField::StartedAt => self.started_at = epoch_millis(value),
            TurnOverHeaderField::EndedAt => self.ended_at = epoch_millis(value),
            TurnOverHeaderField::IsFinished => self.is_finished = flag(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TurnOverDetail {
    pub id: Option<i64>,
    #[serde(flatten)]
    pub header: TurnOverHeader,
    pub checklists: Vec<Checklist>,
    pub memos: Vec<Memo>,
    pub self_introductions: Vec<SelfIntroduction>,
    pub interview_questions: Vec<InterviewQuestion>,
    pub job_applications: Vec<JobApplication>,
    pub updated_at: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnOverUpsertRequest {
    #[serde(flatten)]
    pub header: TurnOverHeader,
    pub checklists: Vec<Checklist>,
    pub memos: Vec<Memo>,
    pub self_introductions: Vec<SelfIntroduction>,
    pub interview_questions: Vec<InterviewQuestion>,
    pub job_applications: Vec<JobApplication>,
}
