//! Department -> Course Cascading Select
//!
//! Choosing a department reloads the course list for it. An empty list
//! (or no department) leaves the course select disabled.

use std::cell::Cell;
use std::rc::Rc;

use leptos::task::spawn_local;
use wasm_bindgen::JsCast;
use web_sys::HtmlSelectElement;

use super::banner::{show_message, BannerKind};
use crate::commands;
use crate::context::PageContext;
use crate::dom;
use crate::error::ApiError;
use crate::models::Course;

const DEPARTMENT_ID: &str = "department";
const COURSE_ID: &str = "course";
pub const PLACEHOLDER: &str = "Select Course";
pub const LOADING: &str = "Loading courses...";
pub const NONE_AVAILABLE: &str = "No courses available";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl CourseOption {
    fn blank(label: &str) -> Self {
        Self { value: String::new(), label: label.to_string(), selected: false }
    }
}

/// Options for the course select and whether it is usable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoursePlan {
    pub options: Vec<CourseOption>,
    pub enabled: bool,
}

impl CoursePlan {
    pub fn disabled(label: &str) -> Self {
        Self { options: vec![CourseOption::blank(label)], enabled: false }
    }

    pub fn loading() -> Self {
        Self { options: vec![CourseOption::blank(LOADING)], enabled: true }
    }

    /// Placeholder plus one option per course; `keep` stays selected if listed
    pub fn from_courses(courses: &[Course], keep: &str) -> Self {
        if courses.is_empty() {
            return Self::disabled(NONE_AVAILABLE);
        }
        let mut options = Vec::with_capacity(courses.len() + 1);
        options.push(CourseOption::blank(PLACEHOLDER));
        options.extend(courses.iter().map(|c| CourseOption {
            value: c.id.clone(),
            label: format!("{} ({})", c.name, c.code),
            selected: !keep.is_empty() && c.id == keep,
        }));
        Self { options, enabled: true }
    }
}

/// Message for the error banner
pub fn load_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Rejected(msg) => format!("Error loading courses: {}", msg),
        _ => "Error loading courses. Please try again.".to_string(),
    }
}

fn render(select: &HtmlSelectElement, plan: &CoursePlan) {
    select.set_inner_html("");
    for opt in &plan.options {
        let Ok(option) = web_sys::HtmlOptionElement::new_with_text_and_value(&opt.label, &opt.value) else {
            continue;
        };
        option.set_selected(opt.selected);
        let _ = select.append_child(&option);
    }
    if !plan.options.iter().any(|o| o.selected) {
        select.set_value("");
    }
    select.set_disabled(!plan.enabled);
}

/// Course select bound to a department select
struct CascadingSelect {
    course: HtmlSelectElement,
    endpoint: String,
    /// Bumped per change so a slow response for an old department is ignored
    generation: Cell<u64>,
}

fn on_department_change(cascade: &Rc<CascadingSelect>, department_id: String) {
    let keep = cascade.course.value();
    let generation = cascade.generation.get() + 1;
    cascade.generation.set(generation);
    log::debug!(target: "course_select", "department -> {:?}", department_id);

    if department_id.is_empty() {
        render(&cascade.course, &CoursePlan::disabled(PLACEHOLDER));
        return;
    }
    render(&cascade.course, &CoursePlan::loading());

    let this = cascade.clone();
    spawn_local(async move {
        let result = commands::courses_by_department(&this.endpoint, &department_id).await;
        if this.generation.get() != generation {
            return;
        }
        match result {
            Ok(courses) => {
                if courses.is_empty() {
                    log::warn!(target: "course_select", "no courses for department {}", department_id);
                }
                render(&this.course, &CoursePlan::from_courses(&courses, &keep));
            }
            Err(e) => {
                log::error!(target: "course_select", "loading courses failed: {}", e);
                show_message(BannerKind::Error, &load_error_message(&e));
                render(&this.course, &CoursePlan::disabled(PLACEHOLDER));
            }
        }
    });
}

pub fn wire(ctx: &PageContext) {
    let department = dom::by_id_as::<HtmlSelectElement>(DEPARTMENT_ID);
    let course = dom::by_id_as::<HtmlSelectElement>(COURSE_ID);
    let (Some(department), Some(course)) = (department, course) else {
        return;
    };

    let cascade = Rc::new(CascadingSelect {
        course,
        endpoint: ctx.config().endpoints.courses_by_department.clone(),
        generation: Cell::new(0),
    });
    log::debug!(target: "course_select", "initial department {:?}, course {:?}", department.value(), cascade.course.value());

    dom::listen(&department, "change", move |ev: web_sys::Event| {
        let value = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
            .map(|s| s.value())
            .unwrap_or_default();
        on_department_change(&cascade, value);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: &str, name: &str, code: &str) -> Course {
        Course { id: id.into(), name: name.into(), code: code.into() }
    }

    #[test]
    fn test_no_courses_disables() {
        let plan = CoursePlan::from_courses(&[], "");
        assert!(!plan.enabled);
        assert_eq!(plan.options.len(), 1);
        assert_eq!(plan.options[0].label, NONE_AVAILABLE);
        assert_eq!(plan.options[0].value, "");
    }

    #[test]
    fn test_n_courses_give_n_plus_one_options() {
        let courses = vec![
            course("1", "Computer Science", "BSCS"),
            course("2", "Information Technology", "BSIT"),
            course("3", "Information Systems", "BSIS"),
        ];
        let plan = CoursePlan::from_courses(&courses, "");
        assert!(plan.enabled);
        assert_eq!(plan.options.len(), 4);
        assert_eq!(plan.options[0].label, PLACEHOLDER);
        assert_eq!(plan.options[2].label, "Information Technology (BSIT)");
        assert_eq!(plan.options[2].value, "2");
        assert!(plan.options.iter().all(|o| !o.selected));
    }

    #[test]
    fn test_previous_course_stays_selected() {
        let courses = vec![course("1", "Nursing", "BSN"), course("2", "Midwifery", "BSM")];
        let plan = CoursePlan::from_courses(&courses, "2");
        let selected: Vec<_> = plan.options.iter().filter(|o| o.selected).map(|o| o.value.as_str()).collect();
        assert_eq!(selected, vec!["2"]);
    }

    #[test]
    fn test_load_error_message() {
        assert_eq!(
            load_error_message(&ApiError::Rejected("Department not found".into())),
            "Error loading courses: Department not found"
        );
        assert_eq!(load_error_message(&ApiError::Http { status: 500 }), "Error loading courses. Please try again.");
    }
}
