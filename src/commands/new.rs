//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Folio;

const DEFAULT_SCAFFOLD: &str = "---\ntitle: {{ title }}\ndate: {{ date }}\ntags:\n---\n";

/// Create `<posts_dir>/<slug>.md`, or `<posts_dir>/<path>.md` when given
pub fn create_post(folio: &Folio, title: &str, path: Option<&str>) -> Result<PathBuf> {
    let now = chrono::Local::now();

    let name = match path {
        Some(p) => p.trim_end_matches(".md").to_string(),
        None => slug::slugify(title),
    };
    if name.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    let file_path = folio.posts_dir().join(format!("{}.md", name));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let scaffold_path = folio.base_dir.join("scaffolds/post.md");
    let scaffold = if scaffold_path.exists() {
        fs::read_to_string(&scaffold_path)?
    } else {
        DEFAULT_SCAFFOLD.to_string()
    };

    let content = scaffold
        .replace("{{ title }}", &yaml_string(title))
        .replace("{{ date }}", &now.format("%Y-%m-%d %H:%M:%S").to_string());

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;

    tracing::info!("Created: {:?}", file_path);
    Ok(file_path)
}

/// Quote titles that YAML would otherwise misread
fn yaml_string(s: &str) -> String {
    let needs_quotes = s.contains(": ")
        || s.contains(" #")
        || s.starts_with(|c: char| "[]{}&*!|>'\"%@`#,?-".contains(c));
    if needs_quotes {
        format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::FrontMatter;

    fn folio() -> (tempfile::TempDir, Folio) {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::with_config(dir.path().to_path_buf(), SiteConfig::default());
        (dir, folio)
    }

    #[test]
    fn test_create_post() {
        let (_dir, folio) = folio();
        let path = create_post(&folio, "Hello, Flutter!", None).unwrap();
        assert_eq!(path, folio.posts_dir().join("hello-flutter.md"));

        let content = fs::read_to_string(&path).unwrap();
        let (fm, _) = FrontMatter::parse(&content);
        assert_eq!(fm.title.as_deref(), Some("Hello, Flutter!"));
        assert!(fm.parse_date().is_some());
    }

    #[test]
    fn test_titles_with_colons_stay_valid_yaml() {
        let (_dir, folio) = folio();
        let path = create_post(&folio, "Rust: the \"good\" parts", Some("rust-parts")).unwrap();
        assert!(path.ends_with("rust-parts.md"));

        let (fm, _) = FrontMatter::parse(&fs::read_to_string(&path).unwrap());
        assert_eq!(fm.title.as_deref(), Some("Rust: the \"good\" parts"));
    }

    #[test]
    fn test_existing_file_is_kept() {
        let (_dir, folio) = folio();
        create_post(&folio, "Twice", None).unwrap();
        assert!(create_post(&folio, "Twice", None).is_err());
    }

    #[test]
    fn test_scaffold_is_used() {
        let (dir, folio) = folio();
        fs::create_dir_all(dir.path().join("scaffolds")).unwrap();
        fs::write(
            dir.path().join("scaffolds/post.md"),
            "---\ntitle: {{ title }}\nsummary: TBD\n---\n",
        )
        .unwrap();

        let path = create_post(&folio, "Scaffolded", None).unwrap();
        let (fm, _) = FrontMatter::parse(&fs::read_to_string(&path).unwrap());
        assert_eq!(fm.summary.as_deref(), Some("TBD"));
    }
}
