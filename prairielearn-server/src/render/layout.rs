//! Page shell shared by every rendered page: head, navbar and main container

use super::escape_html;
use crate::context::RequestContext;

const BOOTSTRAP_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@4.6.2/dist/css/bootstrap.min.css";
const BOOTSTRAP_JS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@4.6.2/dist/js/bootstrap.bundle.min.js";
const JQUERY_JS: &str = "https://cdn.jsdelivr.net/npm/jquery@3.7.1/dist/jquery.min.js";
const FONT_AWESOME_CSS: &str =
    "https://cdn.jsdelivr.net/npm/@fortawesome/fontawesome-free@5.15.4/css/all.min.css";

/// Render a full HTML document.
///
/// `title` and `page_note` are escaped; `extra_head` and `content` are
/// trusted markup produced by the page renderers.
pub fn document(
    ctx: &RequestContext,
    title: &str,
    page_note: Option<&str>,
    extra_head: &str,
    content: &str,
) -> String {
    let full_title = match page_note {
        Some(note) => format!("{} - {} | PrairieLearn", title, note),
        None => format!("{} | PrairieLearn", title),
    };

    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1, shrink-to-fit=no" />
    <title>{title}</title>
    <link rel="stylesheet" href="{BOOTSTRAP_CSS}" />
    <link rel="stylesheet" href="{FONT_AWESOME_CSS}" />
    <script src="{JQUERY_JS}"></script>
    <script src="{BOOTSTRAP_JS}"></script>
    {extra_head}
  </head>
  <body>
    {navbar}
    <main id="content" class="container">
      {content}
    </main>
  </body>
</html>
"#,
        title = escape_html(&full_title),
        navbar = navbar(ctx),
    )
}

fn navbar(ctx: &RequestContext) -> String {
    let location = match ctx.navbar_label() {
        Some(label) => format!(
            r#"<a class="navbar-text text-light mr-auto" href="{}">{}</a>"#,
            escape_html(&ctx.url_prefix),
            escape_html(&label)
        ),
        None => r#"<span class="mr-auto"></span>"#.to_string(),
    };

    format!(
        r#"<nav class="navbar navbar-dark bg-dark navbar-expand-md mb-4" aria-label="Global navigation">
      <a class="navbar-brand" href="/">PrairieLearn</a>
      {location}
      <a class="nav-link text-light" href="/news_items">News</a>
      <span class="navbar-text text-light" id="navbar-user">{user}</span>
    </nav>"#,
        user = escape_html(ctx.authn_user.display_name()),
    )
}
