//! Bootstrap modal wrapping a POST form

use super::escape_html;

/// Confirmation dialog whose footer holds the form's hidden fields and buttons
pub struct Modal<'a> {
    pub id: &'a str,
    pub title: &'a str,
    /// Trusted markup
    pub body: &'a str,
    /// Trusted markup
    pub footer: &'a str,
}

impl Modal<'_> {
    pub fn render(&self) -> String {
        let id = escape_html(self.id);
        format!(
            r#"<div class="modal fade" tabindex="-1" role="dialog" id="{id}" aria-labelledby="{id}-title">
  <div class="modal-dialog" role="document">
    <form method="POST" class="modal-content">
      <div class="modal-header">
        <h2 class="modal-title h4" id="{id}-title">{title}</h2>
      </div>
      <div class="modal-body">{body}</div>
      <div class="modal-footer">{footer}</div>
    </form>
  </div>
</div>"#,
            title = escape_html(self.title),
            body = self.body,
            footer = self.footer,
        )
    }
}
