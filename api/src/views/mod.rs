//! Server-rendered HTML pages.
//!
//! Every page is built with `format!` and `push_str`; anything that came from
//! the database or the request goes through [`layout::html_escape`].

pub mod errors;
pub mod layout;
pub mod login;
pub mod ticket_detail;
pub mod ticket_form;
pub mod ticket_list;
