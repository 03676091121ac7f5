//! Server-rendered HTML for the prediction forms

use crate::types::Domain;
use std::fmt;

const APP_TITLE: &str = "Health Assistant";
const MENU_TITLE: &str = "Multiple Disease Prediction System";

const STYLE: &str = "\
body{margin:0;font-family:sans-serif;display:flex;min-height:100vh}\
nav{width:18rem;background:#f0f2f6;padding:1.5rem}\
nav h2{font-size:1.1rem}\
nav a{display:block;padding:.5rem .75rem;margin:.25rem 0;border-radius:.4rem;color:#262730;text-decoration:none}\
nav a.active{background:#ff4b4b;color:#fff}\
main{flex:1;padding:2rem 3rem}\
.grid{display:grid;gap:1rem 1.5rem;margin-bottom:1.5rem}\
label{display:block;font-size:.85rem;margin-bottom:.25rem}\
input{width:100%;box-sizing:border-box;padding:.4rem}\
.status{margin-top:1.5rem;padding:1rem;border-radius:.4rem}\
.success{background:#dff5e3;color:#1b5e20}\
.error{background:#fde2e2;color:#8a1c1c}";

/// Outcome block shown under the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Success(String),
    Error(String),
}

/// Render the page for a domain with the given field values.
///
/// `values` is aligned with `domain.fields()`; missing entries render blank.
pub fn page<S: AsRef<str>>(domain: Domain, values: &[S], status: Option<&Status>) -> String {
    Page {
        domain,
        values,
        status,
    }
    .to_string()
}

/// Render the page for an unknown route
pub fn not_found(path: &str) -> String {
    NotFound(path).to_string()
}

struct Page<'a, S> {
    domain: Domain,
    values: &'a [S],
    status: Option<&'a Status>,
}

impl<S: AsRef<str>> fmt::Display for Page<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let domain = self.domain;

        head(f)?;
        sidebar(f, domain)?;

        write!(
            f,
            "<main><h1>{}</h1><form method=\"post\" action=\"/{}\">\
             <div class=\"grid\" style=\"grid-template-columns:repeat({},1fr)\">",
            Escaped(domain.page_title()),
            domain.slug(),
            domain.columns()
        )?;

        for (i, field) in domain.fields().iter().enumerate() {
            let value = self.values.get(i).map_or("", |v| v.as_ref());
            write!(
                f,
                "<div><label for=\"{key}\">{label}</label>\
                 <input type=\"text\" id=\"{key}\" name=\"{key}\" value=\"{value}\"></div>",
                key = field.key,
                label = Escaped(field.label),
                value = Escaped(value)
            )?;
        }

        write!(
            f,
            "</div><button type=\"submit\">{}</button></form>",
            Escaped(domain.button_label())
        )?;

        if let Some(status) = self.status {
            let (class, message) = match status {
                Status::Success(message) => ("success", message),
                Status::Error(message) => ("error", message),
            };
            write!(
                f,
                "<div class=\"status {class}\" role=\"status\">{}</div>",
                Escaped(message)
            )?;
        }

        f.write_str("</main></body></html>")
    }
}

struct NotFound<'a>(&'a str);

impl fmt::Display for NotFound<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        head(f)?;
        sidebar(f, Domain::default())?;
        write!(
            f,
            "<main><h1>Page not found</h1><p>No prediction page at <code>{}</code>.</p></main></body></html>",
            Escaped(self.0)
        )
    }
}

fn head(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
        f,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>{APP_TITLE}</title><style>{STYLE}</style></head><body>"
    )
}

fn sidebar(f: &mut fmt::Formatter<'_>, active: Domain) -> fmt::Result {
    write!(f, "<nav><h2>{MENU_TITLE}</h2>")?;
    for domain in Domain::ALL {
        let class = if domain == active { " class=\"active\"" } else { "" };
        write!(
            f,
            "<a href=\"/{}\"{class}>{}</a>",
            domain.slug(),
            Escaped(domain.menu_label())
        )?;
    }
    f.write_str("</nav>")
}

/// Text escaped for element content and quoted attribute values
pub struct Escaped<'a>(pub &'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rest = self.0;
        while let Some(pos) = rest.find(['&', '<', '>', '"', '\'']) {
            f.write_str(&rest[..pos])?;
            let entity = match rest.as_bytes()[pos] {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'"' => "&quot;",
                _ => "&#39;",
            };
            f.write_str(entity)?;
            rest = &rest[pos + 1..];
        }
        f.write_str(rest)
    }
}
