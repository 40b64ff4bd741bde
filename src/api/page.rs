use crate::client::render::escape_html;
use crate::client::{FormValues, SubmissionSurface};

const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Document Keyword Scanner</title>
<style>
  body { font-family: sans-serif; max-width: 860px; margin: 2rem auto; padding: 0 1rem; }
  form { display: grid; gap: .6rem; }
  input { padding: .5rem; }
  .alert { color: #8a5300; }
  .error { color: #b00020; }
  .result-item { border-bottom: 1px solid #ddd; padding: .8rem 0; }
  .excerpt { white-space: pre-wrap; }
  mark { background: #ffe066; }
</style>
</head>
<body>
<h1>Document Keyword Scanner</h1>
<form method="post" action="/search">
  <label>Page URL <input type="url" name="url" placeholder="https://example.com" value="{{url}}"></label>
  <label>Keyword <input type="text" name="keyword" value="{{keyword}}"></label>
  <button type="submit"{{disabled}}>Scan</button>
</form>
{{alert}}
<div id="results">{{results}}</div>
</body>
</html>
"#;

/// The index page, reflecting the given form values and surface.
pub fn render_page(form: &FormValues, surface: &SubmissionSurface) -> String {
    let alert = surface
        .alert()
        .map(|msg| format!("<p class=\"alert\">{}</p>", escape_html(msg)))
        .unwrap_or_default();
    let disabled = if surface.submit_enabled() { "" } else { " disabled" };

    let slots = [
        ("url", escape_html(&form.url)),
        ("keyword", escape_html(&form.keyword)),
        ("disabled", disabled.to_string()),
        ("alert", alert),
        ("results", surface.results_html().to_string()),
    ];
    fill_template(INDEX_TEMPLATE, &slots)
}

/// Substitutes `{{name}}` slots in a single pass over `template`, so text
/// coming from a slot value is never scanned for further slots.
fn fill_template(template: &str, slots: &[(&str, String)]) -> String {
    let mut page = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        page.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            rest = &rest[open..];
            break;
        };
        let name = &after[..close];
        match slots.iter().find(|(slot, _)| *slot == name) {
            Some((_, value)) => page.push_str(value),
            None => page.push_str(&rest[open..open + close + 4]),
        }
        rest = &after[close + 2..];
    }

    page.push_str(rest);
    page
}
