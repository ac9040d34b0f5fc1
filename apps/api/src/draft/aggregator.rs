//! Draft aggregation: one persisted detail document split into per-section
//! editors, and recombined into one upsert request on save.
//!
//! The detail is only ever borrowed; every section is copied out of it, so
//! edits to a draft can never reach data the caller still owns. Saving sends
//! every section in full. There is no partial-section save and no diffing.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::draft::backend::DocumentKind;
use crate::editor::{FieldSet, HeaderEdit, NestedEdit, NestedSectionEditor, SectionEdit, SectionEditor};
use crate::models::attachment::{Attachment, AttachmentCategory, AttachmentField};
use crate::models::resume::{
    Activity, ActivityField, Career, CareerField, Education, EducationField, LanguageSkill,
    LanguageSkillField, LanguageTestField, Project, ProjectField, ResumeDetail, ResumeHeader,
    ResumeHeaderField, ResumeUpsertRequest,
};
use crate::models::turnover::{
    ApplicationStageField, Checklist, ChecklistField, InterviewQuestion, InterviewQuestionField,
    JobApplication, JobApplicationField, Memo, NoteField, SelfIntroduction, TurnOverDetail,
    TurnOverHeader, TurnOverHeaderField, TurnOverUpsertRequest,
};

/// Bidirectional mapping between a persisted document and its editors.
pub trait DraftAggregator:
    Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
    type Detail: DeserializeOwned + Send;
    type Request: Serialize + Send;
    type Edit: DeserializeOwned + Send + Sync + std::fmt::Debug;

    const KIND: DocumentKind;

    fn load_from_detail(detail: &Self::Detail) -> Self;

    /// Flattens every section into the save payload. Performs no validation:
    /// a blank title produces a request the backend is expected to reject.
    fn to_save_request(&self) -> Self::Request;

    fn apply(&self, edit: &Self::Edit) -> Self;

    /// Gives every empty section one blank record.
    fn seed_empty_sections(&self) -> Self;

    fn document_id(&self) -> Option<i64>;

    fn title(&self) -> &str;
}

fn with_header<H: FieldSet + Clone>(header: &H, edit: &HeaderEdit<H::Field>) -> H {
    let mut next = header.clone();
    next.set_field(edit.field, &edit.value);
    next
}

// ────────────────────────────────────────────────────────────────────────────
// Resume
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDraft {
    pub id: Option<i64>,
    #[serde(flatten)]
    pub header: ResumeHeader,
    pub careers: SectionEditor<Career>,
    pub educations: SectionEditor<Education>,
    pub projects: SectionEditor<Project>,
    pub activities: SectionEditor<Activity>,
    pub language_skills: NestedSectionEditor<LanguageSkill>,
    pub attachments: SectionEditor<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "section", content = "edit", rename_all = "camelCase")]
pub enum ResumeEdit {
    Header(HeaderEdit<ResumeHeaderField>),
    Careers(SectionEdit<CareerField>),
    Educations(SectionEdit<EducationField>),
    Projects(SectionEdit<ProjectField>),
    Activities(SectionEdit<ActivityField>),
    LanguageSkills(NestedEdit<LanguageSkillField, LanguageTestField>),
    Attachments(SectionEdit<AttachmentField, AttachmentCategory>),
}

impl DraftAggregator for ResumeDraft {
    type Detail = ResumeDetail;
    type Request = ResumeUpsertRequest;
    type Edit = ResumeEdit;

    const KIND: DocumentKind = DocumentKind::Resume;

    fn load_from_detail(detail: &ResumeDetail) -> Self {
        Self {
            id: detail.id,
            header: detail.header.clone(),
            careers: SectionEditor::new(detail.careers.clone()),
            educations: SectionEditor::new(detail.educations.clone()),
            projects: SectionEditor::new(detail.projects.clone()),
            activities: SectionEditor::new(detail.activities.clone()),
            language_skills: NestedSectionEditor::new(detail.language_skills.clone()),
            attachments: SectionEditor::new(detail.attachments.clone()),
        }
    }

    fn to_save_request(&self) -> ResumeUpsertRequest {
        ResumeUpsertRequest {
            header: self.header.clone(),
            careers: self.careers.to_vec(),
            educations: self.educations.to_vec(),
            projects: self.projects.to_vec(),
            activities: self.activities.to_vec(),
            language_skills: self.language_skills.reconciled().to_vec(),
            attachments: self.attachments.to_vec(),
        }
    }

    fn apply(&self, edit: &ResumeEdit) -> Self {
        let mut next = self.clone();
        match edit {
            ResumeEdit::Header(e) => next.header = with_header(&self.header, e),
            ResumeEdit::Careers(e) => next.careers = self.careers.apply(e),
            ResumeEdit::Educations(e) => next.educations = self.educations.apply(e),
            ResumeEdit::Projects(e) => next.projects = self.projects.apply(e),
            ResumeEdit::Activities(e) => next.activities = self.activities.apply(e),
            ResumeEdit::LanguageSkills(e) => next.language_skills = self.language_skills.apply(e),
            ResumeEdit::Attachments(e) => next.attachments = self.attachments.apply(e),
        }
        next
    }

    fn seed_empty_sections(&self) -> Self {
        Self {
            id: self.id,
            header: self.header.clone(),
            careers: self.careers.seeded(),
            educations: self.educations.seeded(),
            projects: self.projects.seeded(),
            activities: self.activities.seeded(),
            language_skills: self.language_skills.seeded(),
            attachments: self.attachments.seeded(),
        }
    }

    fn document_id(&self) -> Option<i64> {
        self.id
    }

    fn title(&self) -> &str {
        &self.header.title
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Turn-over journal
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TurnOverDraft {
    pub id: Option<i64>,
    #[serde(flatten)]
    pub header: TurnOverHeader,
    pub checklists: SectionEditor<Checklist>,
    pub memos: SectionEditor<Memo>,
    pub self_introductions: SectionEditor<SelfIntroduction>,
    pub interview_questions: SectionEditor<InterviewQuestion>,
    pub job_applications: NestedSectionEditor<JobApplication>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "section", content = "edit", rename_all = "camelCase")]
pub enum TurnOverEdit {
    Header(HeaderEdit<TurnOverHeaderField>),
    Checklists(SectionEdit<ChecklistField>),
    Memos(SectionEdit<NoteField>),
    SelfIntroductions(SectionEdit<NoteField>),
    InterviewQuestions(SectionEdit<InterviewQuestionField>),
    JobApplications(NestedEdit<JobApplicationField, ApplicationStageField>),
}

impl DraftAggregator for TurnOverDraft {
    type Detail = TurnOverDetail;
    type Request = TurnOverUpsertRequest;
    type Edit = TurnOverEdit;

    const KIND: DocumentKind = DocumentKind::TurnOver;

    fn load_from_detail(detail: &TurnOverDetail) -> Self {
        Self {
            id: detail.id,
            header: detail.header.clone(),
            checklists: SectionEditor::new(detail.checklists.clone()),
            memos: SectionEditor::new(detail.memos.clone()),
            self_introductions: SectionEditor::new(detail.self_introductions.clone()),
            interview_questions: SectionEditor::new(detail.interview_questions.clone()),
            job_applications: NestedSectionEditor::new(detail.job_applications.clone()),
        }
    }

    fn to_save_request(&self) -> TurnOverUpsertRequest {
        TurnOverUpsertRequest {
            header: self.header.clone(),
            checklists: self.checklists.to_vec(),
            memos: self.memos.to_vec(),
            self_introductions: self.self_introductions.to_vec(),
            interview_questions: self.interview_questions.to_vec(),
            job_applications: self.job_applications.reconciled().to_vec(),
        }
    }

    fn apply(&self, edit: &TurnOverEdit) -> Self {
        let mut next = self.clone();
        match edit {
            TurnOverEdit::Header(e) => next.header = with_header(&self.header, e),
            TurnOverEdit::Checklists(e) => next.checklists = self.checklists.apply(e),
            TurnOverEdit::Memos(e) => next.memos = self.memos.apply(e),
            TurnOverEdit::SelfIntroductions(e) => {
                next.self_introductions = self.self_introductions.apply(e)
            }
            TurnOverEdit::InterviewQuestions(e) => {
                next.interview_questions = self.interview_questions.apply(e)
            }
            TurnOverEdit::JobApplications(e) => {
                next.job_applications = self.job_applications.apply(e)
            }
        }
        next
    }

    fn seed_empty_sections(&self) -> Self {
        Self {
            id: self.id,
            header: self.header.clone(),
            checklists: self.checklists.seeded(),
            memos: self.memos.seeded(),
            self_introductions: self.self_introductions.seeded(),
            interview_questions: self.interview_questions.seeded(),
            job_applications: self.job_applications.seeded(),
        }
    }

    fn document_id(&self) -> Option<i64> {
        self.id
    }

    fn title(&self) -> &str {
        &self.header.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resume_detail() -> ResumeDetail {
        serde_json::from_value(json!({
            "id": 11,
            "title": "Platform engineer",
            "name": "Kim",
            "careers": [
                {"id": 1, "priority": 0, "companyName": "Acme", "startedAt": 1_600_000_000_000_i64},
                {"id": 2, "priority": 1, "companyName": "Globex", "isWorking": true}
            ],
            "educations": [{"id": 3, "priority": 0, "schoolName": "KAIST", "degree": "BACHELOR"}],
            "languageSkills": [
                {"id": 4, "priority": 0, "language": "English", "languageTests": [
                    {"id": 5, "priority": 0, "testName": "TOEIC", "score": "905"},
                    {"id": 6, "priority": 1, "testName": "OPIc", "score": "IH"}
                ]}
            ],
            "attachments": [
                {"id": 7, "priority": 0, "category": "URL", "url": "https://github.com/kim"},
                {"id": 8, "priority": 1, "category": "FILE", "fileName": "cv.pdf", "fileData": "JVBERi0="}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_resume_round_trip_without_edits() {
        let detail = resume_detail();
        let request = ResumeDraft::load_from_detail(&detail).to_save_request();
        assert_eq!(request.header, detail.header);
        assert_eq!(request.careers, detail.careers);
        assert_eq!(request.educations, detail.educations);
        assert_eq!(request.projects, detail.projects);
        assert_eq!(request.activities, detail.activities);
        assert_eq!(request.language_skills, detail.language_skills);
        assert_eq!(request.attachments, detail.attachments);
    }

    #[test]
    fn test_edits_do_not_reach_source_detail() {
        let detail = resume_detail();
        let draft = ResumeDraft::load_from_detail(&detail).apply(&ResumeEdit::Careers(
            SectionEdit::Delete { index: 0 },
        ));
        assert_eq!(draft.careers.len(), 1);
        assert_eq!(detail.careers.len(), 2);
        assert_eq!(detail.careers[0].company_name, "Acme");
    }

    #[test]
    fn test_missing_sections_load_as_empty() {
        let detail: ResumeDetail = serde_json::from_value(json!({"id": 1, "title": "t"})).unwrap();
        let draft = ResumeDraft::load_from_detail(&detail);
        assert!(draft.careers.is_empty());
        assert!(draft.language_skills.is_empty());
        let seeded = draft.seed_empty_sections();
        assert_eq!(seeded.careers.len(), 1);
        assert_eq!(seeded.language_skills.len(), 1);
        assert_eq!(
            seeded.attachments.records().get(0).unwrap().category(),
            AttachmentCategory::File
        );
    }

    #[test]
    fn test_seeding_keeps_populated_sections() {
        let draft = ResumeDraft::load_from_detail(&resume_detail()).seed_empty_sections();
        assert_eq!(draft.careers.len(), 2);
        assert_eq!(draft.projects.len(), 1);
    }

    #[test]
    fn test_save_request_priorities_are_dense_after_edits() {
        let edits: Vec<ResumeEdit> = serde_json::from_value(json!([
            {"section": "careers", "edit": {"op": "add"}},
            {"section": "careers", "edit": {"op": "move", "from": 2, "to": 0}},
            {"section": "careers", "edit": {"op": "delete", "index": 1}},
            {"section": "languageSkills", "edit": {"op": "deleteChild", "parentIndex": 0, "childIndex": 0}},
            {"section": "attachments", "edit": {"op": "add", "mode": "URL"}},
            {"section": "header", "edit": {"field": "title", "value": "Staff engineer"}}
        ]))
        .unwrap();
        let draft = edits.iter().fold(
            ResumeDraft::load_from_detail(&resume_detail()),
            |draft, edit| draft.apply(edit),
        );
        let request = draft.to_save_request();
        let careers: Vec<i32> = request.careers.iter().map(|c| c.priority).collect();
        assert_eq!(careers, vec![0, 1]);
        assert_eq!(request.careers[1].company_name, "Globex");
        let tests = &request.language_skills[0].language_tests;
        assert_eq!(tests.len(), 1);
        assert_eq!(tests.get(0).unwrap().priority, 0);
        assert_eq!(tests.get(0).unwrap().test_name, "OPIc");
        assert_eq!(request.attachments[2].category(), AttachmentCategory::Url);
        assert_eq!(request.attachments[2].priority, 2);
        assert_eq!(request.header.title, "Staff engineer");
    }

    #[test]
    fn test_save_request_skips_validation() {
        let draft = ResumeDraft::default();
        let request = serde_json::to_value(draft.to_save_request()).unwrap();
        assert_eq!(request["title"], "");
        assert_eq!(request["careers"], json!([]));
    }

    #[test]
    fn test_turn_over_round_trip_and_nested_edit() {
        let detail: TurnOverDetail = serde_json::from_value(json!({
            "id": 3,
            "title": "2025 move",
            "reason": "growth",
            "checklists": [{"id": 1, "priority": 0, "content": "Update resume", "isChecked": true}],
            "jobApplications": [
                {"id": 2, "priority": 0, "companyName": "Acme", "applicationStages": [
                    {"id": 3, "priority": 0, "process": "DOCUMENT", "status": "PASS"},
                    {"id": 4, "priority": 1, "process": "INTERVIEW"}
                ]},
                {"id": 5, "priority": 1, "companyName": "Initech", "applicationStages": []}
            ]
        }))
        .unwrap();
        let draft = TurnOverDraft::load_from_detail(&detail);
        let request = draft.to_save_request();
        assert_eq!(request.checklists, detail.checklists);
        assert_eq!(request.job_applications, detail.job_applications);

        let edited = draft
            .apply(&TurnOverEdit::JobApplications(NestedEdit::AddChild { parent_index: 1 }))
            .apply(&TurnOverEdit::JobApplications(NestedEdit::Delete { index: 0 }));
        let apps = edited.to_save_request().job_applications;
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].company_name, "Initech");
        assert_eq!(apps[0].priority, 0);
        assert_eq!(apps[0].application_stages.len(), 1);
    }

    #[test]
    fn test_draft_serializes_like_detail() {
        let draft = ResumeDraft::load_from_detail(&resume_detail());
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["title"], "Platform engineer");
        assert_eq!(value["careers"][1]["priority"], 1);
        assert_eq!(value["languageSkills"][0]["languageTests"][1]["testName"], "OPIc");
        let back: ResumeDraft = serde_json::from_value(value).unwrap();
        assert_eq!(back, draft);
    }
}
