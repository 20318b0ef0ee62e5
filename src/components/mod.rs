//! Page Widgets
//!
//! Each widget finds its anchors in the server-rendered page and binds to
//! them; a missing anchor means the widget is not on this page.

pub mod applications;
pub mod banner;
pub mod candidate_form;
pub mod course_select;
pub mod department_delete;
pub mod election;
pub mod modal_populator;
pub mod password_reset;
pub mod position_reorder;
pub mod profile;
pub mod user_autocomplete;
pub mod user_edit;
