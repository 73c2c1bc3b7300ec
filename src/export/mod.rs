//! Combined-document export.
//!
//! Renders every note's current revision into one markdown document with a
//! linked table of contents, ordered by note id.

use anyhow::Result;
use minijinja::{context, Environment};
use serde::Serialize;

use crate::infra::{first_line, PREVIEW_FETCH_LEN};
use crate::store::Repository;

/// Template for the single combined markdown document.
const COMBINED_TEMPLATE: &str = r##"# My Notes

**Table of Contents**

{% for note in notes %}- <a href="#note-{{ note.id }}">[{{ note.id }}] {{ note.header }}</a>
{% endfor %}
{% for note in notes %}
### <a name="note-{{ note.id }}">[{{ note.id }}] {{ note.header }}</a>

{{ note.body }}
{% endfor %}"##;

#[derive(Debug, Serialize)]
struct Section {
    id: i64,
    header: String,
    body: String,
}

/// Renders all current revisions as one markdown document.
pub fn export_markdown(repo: &Repository) -> Result<String> {
    let mut revs = repo.list_current_revisions()?;
    revs.sort_by_key(|r| r.note_id);

    let mut notes = Vec::with_capacity(revs.len());
    for rev in &revs {
        let head = repo.blob_head(&rev.sha256, PREVIEW_FETCH_LEN)?;
        let body = repo.blob_body(&rev.sha256)?;
        notes.push(Section {
            id: rev.note_id.as_i64(),
            header: first_line(&head),
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    }

    let mut env = Environment::new();
    env.add_template("combined", COMBINED_TEMPLATE)?;
    let tmpl = env.get_template("combined")?;

    Ok(tmpl.render(context! { notes => notes })?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo_with_notes() -> Repository {
        let mut repo = Repository::open_in_memory().unwrap();
        repo.create_note(b"groceries\nmilk and eggs").unwrap();
        repo.create_note(b"reading list\nbooks to find").unwrap();
        repo
    }

    #[test]
    fn export_contains_toc_and_sections() {
        let doc = export_markdown(&repo_with_notes()).unwrap();

        assert!(doc.starts_with("# My Notes"));
        assert!(doc.contains(r##"<a href="#note-1">[1] groceries</a>"##));
        assert!(doc.contains(r##"<a href="#note-2">[2] reading list</a>"##));
        assert!(doc.contains(r#"<a name="note-1">[1] groceries</a>"#));
        assert!(doc.contains("milk and eggs"));
        assert!(doc.contains("books to find"));
    }

    #[test]
    fn export_orders_sections_by_note_id() {
        let mut repo = repo_with_notes();
        // Touch note 1 so it is the most recently modified; id order must
        // still win in the export.
        let rev = repo.current_revision(crate::domain::NoteId::new(1)).unwrap();
        repo.append_revision(rev.note_id, b"groceries\nmilk, eggs, bread")
            .unwrap();

        let doc = export_markdown(&repo).unwrap();
        let first = doc.find(r#"<a name="note-1">"#).unwrap();
        let second = doc.find(r#"<a name="note-2">"#).unwrap();
        assert!(first < second);
        assert!(doc.contains("milk, eggs, bread"));
    }

    #[test]
    fn export_of_empty_store_is_just_the_shell() {
        let repo = Repository::open_in_memory().unwrap();
        let doc = export_markdown(&repo).unwrap();
        assert!(doc.starts_with("# My Notes"));
        assert!(!doc.contains("<a name="));
    }
}
