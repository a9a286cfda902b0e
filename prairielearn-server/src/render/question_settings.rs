//! Question settings page
//!
//! Pure rendering: every input is fetched by the route handler beforehand.
//! Forms on this page post back to the page URL with an `__action` field;
//! the question tests form posts to the question test path instead.

use super::escape_html;
use super::layout;
use super::modal::Modal;
use crate::context::RequestContext;
use crate::models::{AssessmentsInCourseInstance, Course, Question, SharingSetRow, Tag, Topic};

const POPOVER_STYLE: &str = r#"<style>
      .popover {
        max-width: 50%;
      }
    </style>
    <script>
      $(function () {
        $('[data-toggle="popover"]').popover({ sanitize: false });
        $('[data-toggle="tooltip"]').tooltip();
      });
    </script>"#;

/// Everything the settings page shows
pub struct QuestionSettingsPage<'a> {
    pub ctx: &'a RequestContext,
    /// Course the page is viewed from
    pub course: &'a Course,
    pub question: &'a Question,
    pub topic: Option<&'a Topic>,
    pub tags: &'a [Tag],
    /// Every QID in the course, for the rename form
    pub qids: &'a [String],
    pub assessments_with_question: &'a [AssessmentsInCourseInstance],
    pub sharing_enabled: bool,
    pub enterprise: bool,
    pub sharing_sets_in: &'a [SharingSetRow],
    pub sharing_sets_other: &'a [SharingSetRow],
    /// Courses the viewer may copy the question into
    pub editable_courses: &'a [Course],
    pub question_test_path: &'a str,
    pub question_test_csrf_token: &'a str,
    pub question_github_link: Option<&'a str>,
    /// `info.json` path relative to the course root
    pub info_path: &'a str,
}

impl QuestionSettingsPage<'_> {
    /// Render the full HTML document.
    pub fn render(&self) -> String {
        layout::document(
            self.ctx,
            "Question Settings",
            Some(&self.question.qid),
            POPOVER_STYLE,
            &self.card(),
        )
    }

    fn can_edit(&self) -> bool {
        self.ctx.authz.has_course_permission_edit && !self.course.example_course
    }

    fn can_view(&self) -> bool {
        self.ctx.authz.has_course_permission_view
    }

    fn card(&self) -> String {
        let mut body = String::new();
        body.push_str(&self.general_form());

        if self.sharing_enabled {
            body.push_str(&format!(
                r#"<hr />
        <div>
          <h2 class="h4">Sharing</h2>
          <div data-testid="shared-with">{}</div>
        </div>
        <hr />"#,
                self.sharing_panel()
            ));
        }

        if self.question.supports_question_tests() && self.can_view() {
            body.push_str(&format!(
                r#"<div>
          <h2 class="h4">Tests</h2>
          <div>{}</div>
        </div>"#,
                question_tests_form(self.question_test_path, self.question_test_csrf_token)
            ));
        }

        body.push_str(&self.configuration_link());

        format!(
            r#"<div class="card mb-4">
      <div class="card-header bg-primary text-white d-flex">Question Settings</div>
      <div class="card-body">
        {body}
      </div>
      {footer}
    </div>"#,
            footer = self.footer()
        )
    }

    fn general_form(&self) -> String {
        let question = self.question;

        let change_qid = if self.can_edit() {
            format!(
                r#"<button
              type="button"
              class="btn btn-xs btn-secondary align-top ml-1"
              id="changeQidButton"
              data-toggle="popover"
              data-container="body"
              data-html="true"
              data-placement="auto"
              title="Change QID"
              data-content="{}"
              data-trigger="click"
            >
              <i class="fa fa-i-cursor"></i>
              <span>Change QID</span>
            </button>"#,
                escape_html(&change_id_form(
                    "changeQidButton",
                    &question.qid,
                    self.qids,
                    &self.ctx.csrf_token
                ))
            )
        } else {
            String::new()
        };

        let github_link = self
            .question_github_link
            .map(|link| {
                format!(
                    r#"<a target="_blank" href="{}"> view on GitHub </a>"#,
                    escape_html(link)
                )
            })
            .unwrap_or_default();

        format!(
            r#"<form>
          <div class="form-group">
            <h2 class="h4">General</h2>
            <label for="title">Title</label>
            <input type="text" class="form-control" id="title" name="title" value="{title}" disabled />
            <small class="form-text text-muted">
              The title of the question (e.g., "Add two numbers").
            </small>
          </div>
          <div class="form-group">
            <label for="qid">QID</label>
            {change_qid}
            {github_link}
            <input type="text" class="form-control" id="qid" name="qid" value="{qid}" disabled />
            <small class="form-text text-muted">
              This is a unique identifier for the question. (e.g., "addNumbers")
            </small>
          </div>
          <div>
            <h2 class="h4">Topic</h2>
            {topic}
          </div>
          <hr />
          <div>
            <h2 class="h4">Tags</h2>
            <div>{tags}</div>
          </div>
          <hr />
          <div>
            <h2 class="h4">Assessments</h2>
            <div>{assessments}</div>
          </div>
        </form>"#,
            title = escape_html(&question.title),
            qid = escape_html(&question.qid),
            topic = topic_row(self.topic),
            tags = tag_rows(self.tags),
            assessments = assessment_rows(self.assessments_with_question),
        )
    }

    fn sharing_panel(&self) -> String {
        if self.question.shared_publicly {
            return r#"<div class="row">
            <div class="col-1">
              <div class="badge color-green3">Public</div>
            </div>
            <div class="col-auto">This question is publicly shared.</div>
          </div>"#
                .to_string();
        }

        let mut html = if self.sharing_sets_in.is_empty() {
            r#"<small class="text-muted px-3">This question is not being shared</small>"#
                .to_string()
        } else {
            let badges: String = self
                .sharing_sets_in
                .iter()
                .map(|set| {
                    format!(
                        r#" <span class="badge color-gray1"> {} </span> "#,
                        escape_html(&set.name)
                    )
                })
                .collect();
            format!(r#"<small class="text-muted">Shared With: {}</small>"#, badges)
        };

        if self.ctx.authz.has_course_permission_own {
            if !self.sharing_sets_other.is_empty() {
                html.push_str(&sharing_set_add_form(
                    self.sharing_sets_other,
                    &self.ctx.csrf_token,
                ));
            }
            html.push_str(
                r##"<button
            class="btn btn-sm btn-outline-primary"
            type="button"
            data-toggle="modal"
            data-target="#publiclyShareModal"
          >
            Share Publicly
          </button>"##,
            );
            html.push_str(&publicly_share_modal(
                &self.ctx.csrf_token,
                &self.question.qid,
                self.enterprise,
            ));
        }

        html
    }

    fn configuration_link(&self) -> String {
        if !self.can_view() {
            return String::new();
        }

        let (verb, label) = if self.can_edit() {
            ("file_edit", "Edit question configuration")
        } else {
            ("file_view", "View course configuration")
        };
        let testid = if self.can_edit() {
            r#" data-testid="edit-question-configuration-link""#
        } else {
            ""
        };

        format!(
            r#"<hr />
        <a{testid} href="{prefix}/question/{id}/{verb}/{path}">{label}</a>
        in <code>info.json</code>"#,
            prefix = escape_html(&self.ctx.url_prefix),
            id = self.question.id,
            path = escape_html(self.info_path),
        )
    }

    fn footer(&self) -> String {
        let can_copy_somewhere = !self.editable_courses.is_empty() && self.can_view();
        if !can_copy_somewhere && !self.can_edit() {
            return String::new();
        }

        let mut columns = String::new();

        if can_copy_somewhere && self.question.course_id == self.course.id {
            columns.push_str(&format!(
                r#"<div class="col-auto">
            <button
              type="button"
              class="btn btn-sm btn-primary"
              id="copyQuestionButton"
              data-toggle="popover"
              data-container="body"
              data-html="true"
              data-placement="auto"
              title="Copy this question"
              data-content="{}"
              data-trigger="manual"
              onclick="$(this).popover('show')"
            >
              <i class="fa fa-clone"></i>
              <span>Make a copy of this question</span>
            </button>
          </div>"#,
                escape_html(&copy_form(
                    &self.ctx.csrf_token,
                    self.course,
                    self.editable_courses,
                    "copyQuestionButton"
                ))
            ));
        }

        if self.can_edit() {
            columns.push_str(
                r##"<div class="col-auto">
            <button
              class="btn btn-sm btn-primary"
              id="deleteQuestionButton"
              type="button"
              data-toggle="modal"
              data-target="#deleteQuestionModal"
            >
              <i class="fa fa-times" aria-hidden="true"></i> Delete this question
            </button>
          </div>"##,
            );
            columns.push_str(&delete_question_modal(
                &self.question.qid,
                self.assessments_with_question,
                &self.ctx.csrf_token,
            ));
        }

        format!(
            r#"<div class="card-footer">
        <div class="row">{columns}</div>
      </div>"#
        )
    }
}

fn hidden_fields(action: &str, csrf_token: &str) -> String {
    format!(
        r#"<input type="hidden" name="__action" value="{}" />
      <input type="hidden" name="__csrf_token" value="{}" />"#,
        escape_html(action),
        escape_html(csrf_token)
    )
}

fn topic_row(topic: Option<&Topic>) -> String {
    match topic {
        // Topic descriptions are trusted course HTML.
        Some(topic) => format!(
            r#"<div class="list-group">
              <div class="list-group-item d-flex align-items-center">
                <span class="badge color-{color}" data-toggle="tooltip" data-html="true" title="{description}">{name}</span>
              </div>
            </div>"#,
            color = escape_html(&topic.color),
            description = topic.description,
            name = escape_html(&topic.name),
        ),
        None => r#"<small class="text-muted">This question does not have a topic.</small>"#
            .to_string(),
    }
}

fn tag_rows(tags: &[Tag]) -> String {
    if tags.is_empty() {
        return r#" <small class="text-muted"> This question does not have any tags. </small>"#
            .to_string();
    }

    let badges: String = tags
        .iter()
        .map(|tag| {
            format!(
                r#"<span
                class="badge color-{color}"
                style="white-space: unset; word-break: break-all"
                data-toggle="tooltip"
                title="{description}"
              >
                {name}
              </span>"#,
                color = escape_html(&tag.color),
                description = tag.description,
                name = escape_html(&tag.name),
            )
        })
        .collect();

    format!(
        r#"<div class="list-group">
        <div class="list-group-item">{badges}</div>
      </div>"#
    )
}

fn assessment_link(
    course_instance_id: impl std::fmt::Display,
    assessment_id: impl std::fmt::Display,
) -> String {
    format!("/pl/course_instance/{course_instance_id}/instructor/assessment/{assessment_id}")
}

fn assessment_rows(groups: &[AssessmentsInCourseInstance]) -> String {
    if groups.is_empty() {
        return r#"<small class="text-muted text-center">This question is not included in any assessments.</small>"#
            .to_string();
    }

    groups
        .iter()
        .map(|group| {
            let badges: String = group
                .assessments
                .iter()
                .map(|a| {
                    format!(
                        r#"<a href="{href}" class="badge color-{color}">{label}</a> "#,
                        href = assessment_link(group.course_instance_id, a.assessment_id),
                        color = escape_html(&a.color),
                        label = escape_html(&a.label),
                    )
                })
                .collect();

            format!(
                r#"<div class="card pb-2 mb-2">
            <div class="h6 card-header">{long_name} ({short_name})</div>
            <div class="card-body">{badges}</div>
          </div>"#,
                long_name = escape_html(&group.long_name),
                short_name = escape_html(&group.short_name),
            )
        })
        .collect()
}

/// Inline rename form shown in the "Change QID" popover.
fn change_id_form(button_id: &str, old_id: &str, ids: &[String], csrf_token: &str) -> String {
    let other_ids: Vec<&str> = ids
        .iter()
        .map(String::as_str)
        .filter(|id| *id != old_id)
        .collect();
    let other_ids = serde_json::to_string(&other_ids).unwrap_or_else(|_| "[]".to_string());

    format!(
        r#"<form name="change-id-form" class="needs-validation" method="POST" novalidate>
      {hidden}
      <div class="form-group">
        <label for="id">Use only letters, numbers, dashes, and underscores, with no spaces. You may use forward slashes to separate directories.</label>
        <input type="text" class="form-control" id="id" name="id" value="{old_id}" pattern="[\-A-Za-z0-9_\/]+" data-other-ids="{other_ids}" required />
        <div class="invalid-feedback">This QID is invalid or already in use.</div>
      </div>
      <div class="text-right">
        <button type="button" class="btn btn-secondary" onclick="$('#{button_id}').popover('hide')">Cancel</button>
        <button type="submit" class="btn btn-primary">Change</button>
      </div>
    </form>"#,
        hidden = hidden_fields("change_id", csrf_token),
        old_id = escape_html(old_id),
        other_ids = escape_html(&other_ids),
        button_id = escape_html(button_id),
    )
}

fn copy_form(
    csrf_token: &str,
    course: &Course,
    editable_courses: &[Course],
    button_id: &str,
) -> String {
    let placeholder = if course.example_course {
        r#"<option hidden disabled selected value>-- select a course --</option>"#
    } else {
        ""
    };

    let options: String = editable_courses
        .iter()
        .map(|c| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                c.id,
                if c.id == course.id { " selected" } else { "" },
                escape_html(&c.short_name)
            )
        })
        .collect();

    format!(
        r#"<form name="copy-question-form" class="needs-validation" method="POST" novalidate>
      {hidden}
      <div class="form-group">
        <label for="to-course-id-select">The copied question will be added to the following course:</label>
        <select class="form-control" id="to-course-id-select" name="to_course_id" required>
          {placeholder}{options}
        </select>
        <div class="invalid-feedback" id="invalidIdMessage"></div>
      </div>
      <div class="text-right">
        <button type="button" class="btn btn-secondary" onclick="$('#{button_id}').popover('hide')">Cancel</button>
        <button type="submit" class="btn btn-primary">Submit</button>
      </div>
    </form>"#,
        hidden = hidden_fields("copy_question", csrf_token),
        button_id = escape_html(button_id),
    )
}

fn publicly_share_modal(csrf_token: &str, qid: &str, enterprise: bool) -> String {
    let terms = if enterprise {
        r#"<p>
        You retain full ownership of all shared content as described in the
        <a href="https://www.prairielearn.com/legal/terms#2-user-content" target="_blank">Terms of Service</a>.
        To allow PrairieLearn to share your content to other users you agree to the
        <a href="https://www.prairielearn.com/legal/terms#3-user-content-license-grant" target="_blank">User Content License Grant</a>.
      </p>"#
    } else {
        ""
    };

    let body = format!(
        r#"<p>Are you sure you want to publicly share this question?</p>
      <p>
        Once this question is publicly shared, anyone will be able to view it or use it as a part of
        their course. This operation cannot be undone.
      </p>
      {terms}"#
    );
    let footer = format!(
        r#"{hidden}
      <button type="button" class="btn btn-secondary" data-dismiss="modal">Cancel</button>
      <button class="btn btn-primary" type="submit">Publicly Share "{qid}"</button>"#,
        hidden = hidden_fields("share_publicly", csrf_token),
        qid = escape_html(qid),
    );

    Modal {
        id: "publiclyShareModal",
        title: "Confirm Publicly Share Question",
        body: &body,
        footer: &footer,
    }
    .render()
}

fn sharing_set_add_form(sharing_sets_other: &[SharingSetRow], csrf_token: &str) -> String {
    let items: String = sharing_sets_other
        .iter()
        .map(|set| {
            format!(
                r#"<button class="dropdown-item" name="unsafe_sharing_set_id" value="{}">{}</button>"#,
                set.id,
                escape_html(&set.name)
            )
        })
        .collect();

    format!(
        r#"<form name="sharing-set-add" method="POST" class="d-inline">
        {hidden}
        <div class="btn-group btn-group-sm" role="group">
          <button
            id="addSharingSet"
            type="button"
            class="btn btn-sm btn-outline-dark dropdown-toggle"
            data-toggle="dropdown"
            aria-haspopup="true"
            aria-expanded="false"
          >
            Add...
          </button>
          <div class="dropdown-menu" aria-labelledby="addSharingSet">{items}</div>
        </div>
      </form>"#,
        hidden = hidden_fields("sharing_set_add", csrf_token),
    )
}

fn delete_question_modal(
    qid: &str,
    assessments_with_question: &[AssessmentsInCourseInstance],
    csrf_token: &str,
) -> String {
    let mut body = format!(
        r#"<p>Are you sure you want to delete the question <strong>{}</strong>?</p>"#,
        escape_html(qid)
    );

    if !assessments_with_question.is_empty() {
        let items: String = assessments_with_question
            .iter()
            .map(|group| {
                let badges: String = group
                    .assessments
                    .iter()
                    .map(|a| {
                        format!(
                            r#"<a href="{href}" class="badge color-{color} color-hover">{label}</a> "#,
                            href = assessment_link(group.course_instance_id, a.assessment_id),
                            color = escape_html(&a.color),
                            label = escape_html(&a.label),
                        )
                    })
                    .collect();
                format!(
                    r#"<li class="list-group-item"><h6>{}</h6>{}</li>"#,
                    escape_html(&group.short_name),
                    badges
                )
            })
            .collect();

        body.push_str(&format!(
            r#"<p>It is included by these assessments:</p>
      <ul class="list-group my-4">{items}</ul>
      <p>
        So, if you delete it, you will be unable to sync your course content to the database
        until you either remove the question from these assessments or create a new question
        with the same QID.
      </p>"#
        ));
    }

    let footer = format!(
        r#"{hidden}
      <button type="button" class="btn btn-secondary" data-dismiss="modal">Cancel</button>
      <button type="submit" class="btn btn-danger">Delete</button>"#,
        hidden = hidden_fields("delete_question", csrf_token),
    );

    Modal {
        id: "deleteQuestionModal",
        title: "Delete question",
        body: &body,
        footer: &footer,
    }
    .render()
}

fn question_tests_form(question_test_path: &str, csrf_token: &str) -> String {
    format!(
        r#"<form name="question-tests-form" method="POST" action="{path}">
        <input type="hidden" name="__csrf_token" value="{csrf}" />
        <button class="btn btn-sm btn-outline-primary" name="__action" value="test_once">
          Test once with full details
        </button>
        <button class="btn btn-sm btn-outline-primary" name="__action" value="test_100">
          Test 100 times with only results
        </button>
      </form>"#,
        path = escape_html(question_test_path),
        csrf = escape_html(csrf_token),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::sample_context;
    use crate::models::course::sample_course;
    use crate::models::question::sample_question;
    use crate::models::{AssessmentBadge, AuthzData, CourseRole, GradingMethod, Id, QuestionType};
    use scraper::{ElementRef, Html, Selector};

    struct Fixture {
        ctx: RequestContext,
        course: Course,
        question: Question,
        topic: Topic,
        tags: Vec<Tag>,
        qids: Vec<String>,
        assessments: Vec<AssessmentsInCourseInstance>,
        sharing_enabled: bool,
        enterprise: bool,
        sets_in: Vec<SharingSetRow>,
        sets_other: Vec<SharingSetRow>,
        editable_courses: Vec<Course>,
    }

    impl Fixture {
        fn new() -> Self {
            let course = sample_course();
            Self {
                ctx: sample_context(),
                editable_courses: vec![course.clone()],
                course,
                question: sample_question(),
                topic: Topic {
                    id: Id::new(4),
                    name: "Arithmetic".into(),
                    color: "blue1".into(),
                    description: "<em>Adding</em> things".into(),
                },
                tags: Vec::new(),
                qids: vec!["addNumbers".into(), "subtract".into()],
                assessments: Vec::new(),
                sharing_enabled: false,
                enterprise: false,
                sets_in: Vec::new(),
                sets_other: Vec::new(),
            }
        }

        fn with_role(mut self, role: Option<CourseRole>) -> Self {
            self.ctx.authz = AuthzData::from_role(role, false);
            self
        }

        fn render(&self) -> Html {
            let html = QuestionSettingsPage {
                ctx: &self.ctx,
                course: &self.course,
                question: &self.question,
                topic: Some(&self.topic),
                tags: &self.tags,
                qids: &self.qids,
                assessments_with_question: &self.assessments,
                sharing_enabled: self.sharing_enabled,
                enterprise: self.enterprise,
                sharing_sets_in: &self.sets_in,
                sharing_sets_other: &self.sets_other,
                editable_courses: &self.editable_courses,
                question_test_path: "/pl/course/1/question/10/test",
                question_test_csrf_token: "test-token",
                question_github_link: Some(
                    "https://github.com/PrairieLearn/cs101/tree/master/questions/addNumbers",
                ),
                info_path: "questions/addNumbers/info.json",
            }
            .render();
            Html::parse_document(&html)
        }
    }

    fn select<'a>(doc: &'a Html, selector: &str) -> Vec<ElementRef<'a>> {
        doc.select(&Selector::parse(selector).unwrap()).collect()
    }

    fn has(doc: &Html, selector: &str) -> bool {
        !select(doc, selector).is_empty()
    }

    fn text(doc: &Html) -> String {
        doc.root_element().text().collect()
    }

    fn action_values(doc: &Html) -> Vec<String> {
        select(doc, r#"input[name="__action"]"#)
            .iter()
            .filter_map(|e| e.value().attr("value").map(str::to_string))
            .collect()
    }

    fn popover_form(doc: &Html, button: &str) -> Html {
        let content = select(doc, button)[0]
            .value()
            .attr("data-content")
            .unwrap()
            .to_string();
        Html::parse_fragment(&content)
    }

    #[test]
    fn owner_sees_every_action() {
        let doc = Fixture::new().render();

        assert!(has(&doc, "#changeQidButton"));
        assert!(has(&doc, "#copyQuestionButton"));
        assert!(has(&doc, "#deleteQuestionModal"));
        assert!(has(&doc, r#"form[name="question-tests-form"]"#));
        assert!(has(&doc, r#"a[data-testid="edit-question-configuration-link"]"#));

        let actions = action_values(&doc);
        assert!(actions.contains(&"delete_question".to_string()));
    }

    #[test]
    fn modal_buttons_target_their_modals() {
        let mut fixture = Fixture::new();
        fixture.sharing_enabled = true;
        let doc = fixture.render();

        let delete = select(&doc, "#deleteQuestionButton");
        assert_eq!(delete.len(), 1);
        assert_eq!(delete[0].value().attr("data-toggle"), Some("modal"));
        assert_eq!(
            delete[0].value().attr("data-target"),
            Some("#deleteQuestionModal")
        );

        let share = select(&doc, r##"button[data-target="#publiclyShareModal"]"##);
        assert_eq!(share.len(), 1);
        assert!(share[0].text().collect::<String>().contains("Share Publicly"));
        assert!(has(&doc, "#publiclyShareModal"));
    }

    #[test]
    fn general_fields_are_escaped() {
        let mut fixture = Fixture::new();
        fixture.question.title = r#"Add "two" <numbers>"#.into();
        let doc = fixture.render();

        let title = select(&doc, "input#title")[0];
        assert_eq!(title.value().attr("value"), Some(r#"Add "two" <numbers>"#));
        assert!(title.value().attr("disabled").is_some());
        assert_eq!(
            select(&doc, "input#qid")[0].value().attr("value"),
            Some("addNumbers")
        );
    }

    #[test]
    fn viewer_cannot_edit_or_delete() {
        let doc = Fixture::new().with_role(Some(CourseRole::Viewer)).render();

        assert!(!has(&doc, "#changeQidButton"));
        assert!(!has(&doc, "#deleteQuestionModal"));
        assert!(has(&doc, "#copyQuestionButton"));
        assert!(text(&doc).contains("View course configuration"));
        assert!(!text(&doc).contains("Edit question configuration"));

        let link = select(&doc, r#"a[href$="/file_view/questions/addNumbers/info.json"]"#);
        assert_eq!(
            link[0].value().attr("href"),
            Some("/pl/course/1/question/10/file_view/questions/addNumbers/info.json")
        );
    }

    #[test]
    fn previewer_sees_no_footer_tests_or_config_link() {
        let doc = Fixture::new().with_role(Some(CourseRole::Previewer)).render();

        assert!(!has(&doc, ".card-footer"));
        assert!(!has(&doc, r#"form[name="question-tests-form"]"#));
        assert!(!text(&doc).contains("info.json"));
    }

    #[test]
    fn copy_needs_editable_courses() {
        let mut fixture = Fixture::new().with_role(Some(CourseRole::Viewer));
        fixture.editable_courses.clear();
        let doc = fixture.render();

        assert!(!has(&doc, "#copyQuestionButton"));
        assert!(!has(&doc, ".card-footer"));
    }

    #[test]
    fn copy_hidden_for_questions_from_other_courses() {
        let mut fixture = Fixture::new();
        fixture.question.course_id = Id::new(99);
        let doc = fixture.render();

        assert!(!has(&doc, "#copyQuestionButton"));
        assert!(has(&doc, "#deleteQuestionModal"));
    }

    #[test]
    fn example_course_hides_edit_actions() {
        let mut fixture = Fixture::new();
        fixture.course.example_course = true;
        let doc = fixture.render();

        assert!(!has(&doc, "#changeQidButton"));
        assert!(!has(&doc, "#deleteQuestionModal"));
        assert!(text(&doc).contains("View course configuration"));

        let form = popover_form(&doc, "#copyQuestionButton");
        assert!(has(&form, "option[disabled][hidden]"));
    }

    #[test]
    fn copy_form_preselects_current_course() {
        let mut fixture = Fixture::new();
        let mut other = sample_course();
        other.id = Id::new(2);
        other.short_name = "CS 102".into();
        fixture.editable_courses.push(other);
        let doc = fixture.render();

        let form = popover_form(&doc, "#copyQuestionButton");
        assert_eq!(action_values(&form), vec!["copy_question".to_string()]);
        let options = select(&form, "select[name=to_course_id] option");
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].value().attr("value"), Some("1"));
        assert!(options[0].value().attr("selected").is_some());
        assert!(options[1].value().attr("selected").is_none());
        assert!(!has(&form, "option[disabled]"));
    }

    #[test]
    fn change_qid_form_lists_other_qids() {
        let doc = Fixture::new().render();
        let form = popover_form(&doc, "#changeQidButton");

        assert_eq!(action_values(&form), vec!["change_id".to_string()]);
        let input = select(&form, "input#id")[0];
        assert_eq!(input.value().attr("value"), Some("addNumbers"));
        assert_eq!(input.value().attr("data-other-ids"), Some(r#"["subtract"]"#));
    }

    #[test]
    fn tests_form_only_for_internal_freeform() {
        let mut fixture = Fixture::new();
        fixture.question.grading_method = GradingMethod::External;
        assert!(!has(&fixture.render(), r#"form[name="question-tests-form"]"#));

        let mut fixture = Fixture::new();
        fixture.question.question_type = QuestionType::MultipleChoice;
        assert!(!has(&fixture.render(), r#"form[name="question-tests-form"]"#));

        let doc = Fixture::new().render();
        let form = select(&doc, r#"form[name="question-tests-form"]"#)[0];
        assert_eq!(form.value().attr("action"), Some("/pl/course/1/question/10/test"));
        let buttons: Vec<&str> = select(&doc, r#"form[name="question-tests-form"] button"#)
            .iter()
            .filter_map(|b| b.value().attr("value"))
            .collect();
        assert_eq!(buttons, vec!["test_once", "test_100"]);
        let token = select(&doc, r#"form[name="question-tests-form"] input[name="__csrf_token"]"#);
        assert_eq!(token[0].value().attr("value"), Some("test-token"));
    }

    #[test]
    fn empty_tags_and_assessments_have_placeholders() {
        let doc = Fixture::new().render();
        let text = text(&doc);
        assert!(text.contains("This question does not have any tags."));
        assert!(text.contains("This question is not included in any assessments."));
    }

    #[test]
    fn assessments_are_grouped_and_listed_in_delete_modal() {
        let mut fixture = Fixture::new();
        fixture.assessments = vec![AssessmentsInCourseInstance {
            short_name: "Sp24".into(),
            long_name: "Spring 2024".into(),
            course_instance_id: Id::new(5),
            assessments: vec![
                AssessmentBadge {
                    assessment_id: Id::new(50),
                    color: "green1".into(),
                    label: "HW1".into(),
                    title: "Homework 1".into(),
                    assessment_type: "Homework".into(),
                },
                AssessmentBadge {
                    assessment_id: Id::new(51),
                    color: "red1".into(),
                    label: "E1".into(),
                    title: "Exam 1".into(),
                    assessment_type: "Exam".into(),
                },
            ],
        }];
        let doc = fixture.render();

        let header = select(&doc, ".card .h6.card-header")[0].text().collect::<String>();
        assert_eq!(header, "Spring 2024 (Sp24)");
        assert!(has(
            &doc,
            r#"a.badge.color-green1[href="/pl/course_instance/5/instructor/assessment/50"]"#
        ));

        let modal_links = select(&doc, "#deleteQuestionModal a.badge");
        assert_eq!(modal_links.len(), 2);
        assert!(text(&doc).contains("unable to sync your course content"));
    }

    #[test]
    fn sharing_hidden_when_disabled() {
        let doc = Fixture::new().render();
        assert!(!has(&doc, r#"[data-testid="shared-with"]"#));
        assert!(!has(&doc, "#publiclyShareModal"));
    }

    #[test]
    fn unshared_question_offers_sets_to_owner() {
        let mut fixture = Fixture::new();
        fixture.sharing_enabled = true;
        fixture.sets_other = vec![SharingSetRow {
            id: Id::new(3),
            name: "intro".into(),
            in_set: false,
        }];
        let doc = fixture.render();

        assert!(text(&doc).contains("This question is not being shared"));
        let buttons = select(
            &doc,
            r#"form[name="sharing-set-add"] button[name="unsafe_sharing_set_id"]"#,
        );
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].value().attr("value"), Some("3"));
        assert!(has(&doc, "#publiclyShareModal"));
        assert!(action_values(&doc).contains(&"share_publicly".to_string()));
    }

    #[test]
    fn shared_sets_are_listed_without_add_form_when_none_left() {
        let mut fixture = Fixture::new();
        fixture.sharing_enabled = true;
        fixture.sets_in = vec![SharingSetRow {
            id: Id::new(3),
            name: "intro".into(),
            in_set: true,
        }];
        let doc = fixture.render();

        assert!(text(&doc).contains("Shared With:"));
        assert!(select(&doc, r#"[data-testid="shared-with"] .badge.color-gray1"#)[0]
            .text()
            .collect::<String>()
            .contains("intro"));
        assert!(!has(&doc, r#"form[name="sharing-set-add"]"#));
        assert!(has(&doc, "#publiclyShareModal"));
    }

    #[test]
    fn non_owner_cannot_share() {
        let mut fixture = Fixture::new().with_role(Some(CourseRole::Editor));
        fixture.sharing_enabled = true;
        fixture.sets_other = vec![SharingSetRow {
            id: Id::new(3),
            name: "intro".into(),
            in_set: false,
        }];
        let doc = fixture.render();

        assert!(has(&doc, r#"[data-testid="shared-with"]"#));
        assert!(!has(&doc, r#"form[name="sharing-set-add"]"#));
        assert!(!has(&doc, "#publiclyShareModal"));
    }

    #[test]
    fn public_question_never_offers_set_sharing() {
        let mut fixture = Fixture::new();
        fixture.sharing_enabled = true;
        fixture.question.shared_publicly = true;
        fixture.sets_other = vec![SharingSetRow {
            id: Id::new(3),
            name: "intro".into(),
            in_set: false,
        }];
        let doc = fixture.render();

        assert!(text(&doc).contains("This question is publicly shared."));
        assert!(!has(&doc, r#"form[name="sharing-set-add"]"#));
        assert!(!has(&doc, "#publiclyShareModal"));
    }

    #[test]
    fn enterprise_adds_terms_to_share_modal() {
        let mut fixture = Fixture::new();
        fixture.sharing_enabled = true;
        assert!(!text(&fixture.render()).contains("User Content License Grant"));

        fixture.enterprise = true;
        assert!(text(&fixture.render()).contains("User Content License Grant"));
    }

    #[test]
    fn github_link_is_rendered() {
        let doc = Fixture::new().render();
        assert!(has(
            &doc,
            r#"a[href="https://github.com/PrairieLearn/cs101/tree/master/questions/addNumbers"]"#
        ));
    }

    #[test]
    fn forms_carry_csrf_token() {
        let doc = Fixture::new().render();
        for input in select(&doc, "#deleteQuestionModal input[name=__csrf_token]") {
            assert_eq!(input.value().attr("value"), Some("test-csrf-token"));
        }
    }
}
