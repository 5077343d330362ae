//! Server-side HTML rendering for the student pages.

use std::fmt::{self, Write};

use crate::application::student::{DeleteConfirmation, StudentFormView, StudentList};
use crate::domain::form::DATE_FORMAT;
use crate::domain::{Field, Student, StudentDetails};

use super::antiforgery::{AntiforgeryToken, FIELD_NAME};

const FIELDS: [Field; 3] = [Field::LastName, Field::FirstMidName, Field::EnrollmentDate];

/// Text escaped for HTML content and double-quoted attributes as it is
/// formatted.
#[derive(Debug, Clone, Copy)]
pub struct Escaped<'a>(pub &'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rest = self.0;
        while let Some(at) = rest.find(|c: char| matches!(c, '&' | '<' | '>' | '"' | '\'')) {
            f.write_str(&rest[..at])?;
            f.write_str(match rest.as_bytes()[at] {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'"' => "&quot;",
                _ => "&#39;",
            })?;
            rest = &rest[at + 1..];
        }
        f.write_str(rest)
    }
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} - Registrar</title>\n</head>\n<body>\n\
         <nav><a href=\"/Students\">Students</a></nav>\n<main>\n<h1>{title}</h1>\n{body}</main>\n\
         </body>\n</html>\n",
        title = Escaped(title),
    )
}

fn sort_link(key: &str) -> String {
    if key.is_empty() {
        "/Students".to_string()
    } else {
        format!("/Students?sortOrder={}", Escaped(key))
    }
}

fn date(student: &Student) -> String {
    student.enrollment_date.format(DATE_FORMAT).to_string()
}

/// Student list with sortable column headers.
#[must_use]
pub fn student_list(list: &StudentList) -> String {
    let mut body = String::from("<p><a href=\"/Students/Create\">Create New</a></p>\n");
    let _ = write!(
        body,
        "<table>\n<thead><tr><th><a href=\"{}\">Name</a></th>\
         <th><a href=\"{}\">Enrollment Date</a></th><th></th></tr></thead>\n<tbody>\n",
        sort_link(list.name_sort),
        sort_link(list.date_sort),
    );
    for student in &list.students {
        let _ = write!(
            body,
            "<tr><td>{name}</td><td>{date}</td><td>\
             <a href=\"/Students/Edit/{id}\">Edit</a> | \
             <a href=\"/Students/Details/{id}\">Details</a> | \
             <a href=\"/Students/Delete/{id}\">Delete</a></td></tr>\n",
            name = Escaped(&student.full_name()),
            date = date(student),
            id = student.id,
        );
    }
    body.push_str("</tbody>\n</table>\n");
    layout("Students", &body)
}

fn student_summary(student: &Student) -> String {
    format!(
        "<dl>\n<dt>Last Name</dt><dd>{}</dd>\n<dt>First Name</dt><dd>{}</dd>\n\
         <dt>Enrollment Date</dt><dd>{}</dd>\n</dl>\n",
        Escaped(&student.last_name),
        Escaped(&student.first_mid_name),
        date(student),
    )
}

/// Student details with enrollments.
#[must_use]
pub fn student_details(details: &StudentDetails) -> String {
    let mut body = student_summary(&details.student);
    body.push_str("<h2>Enrollments</h2>\n");
    if details.enrollments.is_empty() {
        body.push_str("<p>No enrollments.</p>\n");
    } else {
        body.push_str("<table>\n<thead><tr><th>Course</th><th>Credits</th><th>Grade</th></tr></thead>\n<tbody>\n");
        for detail in &details.enrollments {
            let grade = detail
                .enrollment
                .grade
                .map_or("No grade", |g| g.as_str());
            let _ = writeln!(
                body,
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                Escaped(&detail.course.title),
                detail.course.credits,
                grade,
            );
        }
        body.push_str("</tbody>\n</table>\n");
    }
    let _ = writeln!(
        body,
        "<p><a href=\"/Students/Edit/{}\">Edit</a> | <a href=\"/Students\">Back to List</a></p>",
        details.student.id
    );
    layout("Details", &body)
}

fn token_field(token: &AntiforgeryToken) -> String {
    format!(
        "<input type=\"hidden\" name=\"{FIELD_NAME}\" value=\"{}\">\n",
        token.as_str()
    )
}

/// Create or edit form, including any validation messages.
#[must_use]
pub fn student_form(view: &StudentFormView, token: &AntiforgeryToken) -> String {
    let (title, action) = match view.id {
        Some(id) => ("Edit", format!("/Students/Edit/{id}")),
        None => ("Create", "/Students/Create".to_string()),
    };

    let mut body = String::new();
    let form_errors: Vec<_> = view.errors.form_errors().collect();
    if !form_errors.is_empty() {
        body.push_str("<div class=\"validation-summary\">\n<ul>\n");
        for message in form_errors {
            let _ = writeln!(body, "<li>{}</li>", Escaped(message));
        }
        body.push_str("</ul>\n</div>\n");
    }

    let _ = writeln!(body, "<form method=\"post\" action=\"{action}\">");
    body.push_str(&token_field(token));
    if let Some(id) = view.id {
        let _ = writeln!(body, "<input type=\"hidden\" name=\"ID\" value=\"{id}\">");
    }
    for field in FIELDS {
        let input_type = match field {
            Field::EnrollmentDate => "date",
            _ => "text",
        };
        let _ = writeln!(
            body,
            "<div>\n<label for=\"{name}\">{label}</label>\n\
             <input type=\"{input_type}\" id=\"{name}\" name=\"{name}\" value=\"{value}\">",
            name = field.form_name(),
            label = field.display_name(),
            value = Escaped(view.form.value(field)),
        );
        for message in view.errors.for_field(field) {
            let _ = writeln!(
                body,
                "<span class=\"field-validation-error\">{}</span>",
                Escaped(message)
            );
        }
        body.push_str("</div>\n");
    }
    let _ = writeln!(
        body,
        "<button type=\"submit\">{}</button>\n</form>\n<p><a href=\"/Students\">Back to List</a></p>",
        if view.id.is_some() { "Save" } else { "Create" }
    );
    layout(title, &body)
}

/// Delete confirmation, with the failure message after a failed attempt.
#[must_use]
pub fn delete_confirmation(view: &DeleteConfirmation, token: &AntiforgeryToken) -> String {
    let mut body = String::new();
    if let Some(message) = view.error_message {
        let _ = writeln!(body, "<p class=\"text-danger\">{}</p>", Escaped(message));
    }
    body.push_str("<h3>Are you sure you want to delete this?</h3>\n");
    body.push_str(&student_summary(&view.student));
    let _ = writeln!(
        body,
        "<form method=\"post\" action=\"/Students/Delete/{}\">",
        view.student.id
    );
    body.push_str(&token_field(token));
    body.push_str(
        "<button type=\"submit\">Delete</button> | <a href=\"/Students\">Back to List</a>\n</form>\n",
    );
    layout("Delete", &body)
}

#[must_use]
pub fn not_found() -> String {
    layout("Not Found", "<p>The requested student could not be found.</p>\n")
}

#[must_use]
pub fn bad_request() -> String {
    layout(
        "Bad Request",
        "<p>The form has expired or was not submitted from this site. Reload the page and try again.</p>\n",
    )
}

#[must_use]
pub fn server_error() -> String {
    layout(
        "Error",
        "<p>An error occurred while processing your request.</p>\n",
    )
}
