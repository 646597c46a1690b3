//! End-to-end tests for the search index.
//!
//! These tests build a small site on disk, run every page through the plugin
//! host and check the JSON file that comes out.

use std::{fs, path::Path};

use mdindex_core::{ContentKind, IndexConfig, PageContext, Pattern, PluginHost};
use mdindex_search::{Decision, Hooks, IndexState, SearchIndex, SearchIndexer, SearchPlugin};

const GUIDE: &str = r#"---
title: Guide
description: Getting started
tags:
  - docs
  - intro
---

Preamble before any heading is not indexed.

# Install

Run the installer with **admin** rights.

```bash
./install.sh --prefix /usr/local
```

```python
print("not indexed")
```

- first step
- second step

> Keep your *backup* handy.

<div class="note">raw html</div>

{{ template_call() }}

## Configure

Edit the [config file](config.md).

# Install

More install notes.
"#;

const DRAFT: &str = "---\ntitle: Draft\nsearch: false\n---\n\n# Hidden\n\nSecret.\n";

const PLAIN: &str = "# Plain\n\nNo frontmatter here.\n";

fn write_site(root: &Path) -> Vec<PageContext> {
    let content = root.join("content");
    fs::create_dir_all(content.join("docs")).unwrap();

    let files = [
        ("docs/guide.md", GUIDE),
        ("docs/draft.md", DRAFT),
        ("docs/plain.md", PLAIN),
    ];

    let public = root.join("public");
    files
        .iter()
        .map(|(name, body)| {
            let path = content.join(name);
            fs::write(&path, body).unwrap();
            PageContext::for_content_file(&content, &public, &path).expect("page context")
        })
        .collect()
}

fn bash_config() -> IndexConfig {
    IndexConfig {
        codeblock: vec!["bash".to_string()],
        ..IndexConfig::default()
    }
}

#[test]
fn test_site_build_through_plugin_host() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let pages = write_site(dir.path());

    let mut host = PluginHost::new();
    host.register(SearchPlugin::new(bash_config())).unwrap();

    for page in &pages {
        host.call_shortcode("search", page, &["search".to_string()])
            .unwrap();
    }
    host.after_build().unwrap();

    let path = dir.path().join("public/search.json");
    let index: SearchIndex = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(index.pages.len(), 1);
    let page = &index.pages[0];
    assert_eq!(page.title.as_deref(), Some("Guide"));
    assert_eq!(page.description, "Getting started");
    assert_eq!(page.tags, vec!["docs", "intro"]);
    assert_eq!(page.url, "/docs/guide/");

    let anchors: Vec<_> = index.heading.iter().map(|h| h.anchor.as_str()).collect();
    assert_eq!(anchors, vec!["/docs/guide#install", "/docs/guide#configure"]);

    let install = index.heading_content(0);
    let texts: Vec<_> = install.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "Install",
            "Run the installer with admin rights.",
            "./install.sh --prefix /usr/local",
            "first step\nsecond step",
            "Keep your backup handy.",
            "More install notes.",
        ]
    );

    let code = &install[2];
    assert_eq!(code.kind, ContentKind::Code);
    assert_eq!(code.lang.as_deref(), Some("bash"));

    let configure = index.heading_content(1);
    assert_eq!(configure[1].text, "Edit the config file.");

    assert!(index.content.iter().all(|c| !c.text.contains("Preamble")));
    assert!(index.content.iter().all(|c| !c.text.contains("not indexed")));
    assert!(index.content.iter().all(|c| !c.text.contains("raw html")));
    assert!(index.content.iter().all(|c| !c.text.contains("template_call")));

    for (position, entry) in index.content.iter().enumerate() {
        assert_eq!(entry.cidx, position);
        assert_eq!(entry.sort, entry.kind.sort());
        assert!(index.heading[entry.hidx].cidx.contains(position));
        assert!(index.pages[entry.pidx].cidx.contains(position));
    }
}

#[test]
fn test_repeated_headings_merge_into_one_group() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let pages = write_site(dir.path());

    let indexer = SearchIndexer::new(bash_config());
    let mut state = IndexState::new();
    indexer.index_document(&mut state, &pages[0], "search").unwrap();

    let install = state.index.heading_content(0);
    assert_eq!(install.last().map(|c| c.text.as_str()), Some("More install notes."));
    assert_eq!(state.index.heading.len(), 2);
}

#[test]
fn test_ignore_rules_and_content_kinds() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let pages = write_site(dir.path());

    let mut config = bash_config();
    config.content = vec![ContentKind::Text];
    config.ignore.heading = vec![Pattern::regex("^Conf").unwrap()];
    config.ignore.syntax.push(Pattern::literal("Run the"));

    let indexer = SearchIndexer::new(config);
    let mut state = IndexState::new();
    indexer.index_document(&mut state, &pages[0], "search").unwrap();

    let index = &state.index;
    assert_eq!(index.heading.len(), 1);
    let texts: Vec<_> = index.content.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["Install", "More install notes."]);
}

#[test]
fn test_hooks_rewrite_entries_and_output() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let pages = write_site(dir.path());

    let hooks = Hooks::new()
        .on_heading(|heading| Ok(Decision::Keep(format!("§ {heading}"))))
        .on_content(|text, kind, _| {
            Ok(match kind {
                ContentKind::List => Decision::Skip,
                _ => Decision::keep(text),
            })
        })
        .on_output(|index| {
            Ok(Some(serde_json::json!(
                index
                    .content
                    .iter()
                    .map(|c| c.text.clone())
                    .collect::<Vec<_>>()
            )))
        });

    let indexer = SearchIndexer::with_hooks(bash_config(), hooks);
    let mut state = IndexState::new();
    for page in &pages {
        indexer.index_document(&mut state, page, "all").unwrap();
    }

    let report = indexer.flush(&mut state).unwrap().expect("written");
    assert_eq!(report.path, dir.path().join("public/all.json"));
    assert!(report.transformed);

    let written = fs::read_to_string(&report.path).unwrap();
    let texts: Vec<String> = serde_json::from_str(&written).unwrap();
    assert_eq!(texts[0], "§ Install");
    assert!(texts.iter().all(|t| t != "first step\nsecond step"));
}

#[test]
fn test_render_inline_config() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let pages = write_site(dir.path());

    let config = IndexConfig {
        render_inline: true,
        strip_markdown: false,
        ..bash_config()
    };
    let indexer = SearchIndexer::new(config);
    let mut state = IndexState::new();
    indexer.index_document(&mut state, &pages[0], "search").unwrap();

    let content = &state.index.content;
    assert!(content.iter().any(|c| c.text.contains("<strong>admin</strong>")));
    let code = content
        .iter()
        .find(|c| c.kind == ContentKind::Code)
        .expect("code entry");
    assert_eq!(code.text, "./install.sh --prefix /usr/local");
}

#[test]
fn test_second_build_starts_empty() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let pages = write_site(dir.path());

    let indexer = SearchIndexer::new(bash_config());
    let mut state = IndexState::new();

    for _ in 0..2 {
        indexer.index_document(&mut state, &pages[0], "search").unwrap();
        let report = indexer.flush(&mut state).unwrap().expect("written");
        assert_eq!(report.stats.pages, 1);
    }
}
