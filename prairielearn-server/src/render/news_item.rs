//! News item pages: one item wrapped in the site layout, and the index

use super::escape_html;
use super::layout;
use crate::context::RequestContext;
use crate::models::{NewsItem, NewsItemSummary};

const DATE_FORMAT: &str = "%B %-d, %Y";

/// A single news item
pub struct NewsItemPage<'a> {
    pub ctx: &'a RequestContext,
    pub item: &'a NewsItem,
    /// Contents of the item's `index.html`, trusted
    pub item_html: &'a str,
    pub user_is_instructor: bool,
    /// URL of the item's directory, ending in `/`. Relative asset links in
    /// `item_html` resolve against it.
    pub base_href: &'a str,
}

impl NewsItemPage<'_> {
    pub fn render(&self) -> String {
        let footer = if self.user_is_instructor {
            format!(
                r#"<div class="card-footer small text-muted" id="news-item-visibility">
        This news item is visible to {}.
      </div>"#,
                if self.item.visible_to_students {
                    "all users"
                } else {
                    "instructors only"
                }
            )
        } else {
            String::new()
        };

        let content = format!(
            r#"<div class="card mb-4">
      <div class="card-header bg-primary text-white">
        <h1 class="h5 mb-0">{title}</h1>
      </div>
      <div class="card-body">
        <p class="text-muted small">Posted on {date}</p>
        <div class="news-item-body">{body}</div>
      </div>
      {footer}
    </div>"#,
            title = escape_html(&self.item.title),
            date = self.item.date.format(DATE_FORMAT),
            body = self.item_html,
        );

        let base = format!(r#"<base href="{}" />"#, escape_html(self.base_href));
        layout::document(self.ctx, "News", Some(&self.item.title), &base, &content)
    }
}

/// List of news items visible to the viewer
pub struct NewsItemIndexPage<'a> {
    pub ctx: &'a RequestContext,
    pub items: &'a [NewsItemSummary],
    /// Path of the index itself; item links are relative to it
    pub base_path: &'a str,
}

impl NewsItemIndexPage<'_> {
    pub fn render(&self) -> String {
        let rows = if self.items.is_empty() {
            r#"<tr><td colspan="2" class="text-muted">No news items.</td></tr>"#.to_string()
        } else {
            self.items.iter().map(|summary| self.row(summary)).collect()
        };

        let content = format!(
            r#"<div class="card mb-4">
      <div class="card-header bg-primary text-white">News</div>
      <table class="table table-sm table-hover mb-0" aria-label="News items">
        <thead>
          <tr><th>Title</th><th>Date</th></tr>
        </thead>
        <tbody>{rows}</tbody>
      </table>
    </div>"#
        );

        layout::document(self.ctx, "News", None, "", &content)
    }

    fn row(&self, summary: &NewsItemSummary) -> String {
        let item = &summary.item;
        let badge = if summary.unread {
            r#" <span class="badge badge-primary">New</span>"#
        } else {
            ""
        };

        format!(
            r#"<tr>
            <td><a href="{base}/{id}/">{title}</a>{badge}</td>
            <td>{date}</td>
          </tr>"#,
            base = escape_html(self.base_path.trim_end_matches('/')),
            id = item.id,
            title = escape_html(&item.title),
            date = item.date.format(DATE_FORMAT),
        )
    }
}
