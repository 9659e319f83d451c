//! Document shell shared by every page, plus the bundled browser assets

use super::footer::render_footer;
use crate::config::SiteConfig;
use crate::helpers::{full_url_for, html_escape, meta_generator, url_for};

/// Output path of the browser script, relative to the public dir
pub const SCRIPT_PATH: &str = "js/folio.js";
/// Output path of the stylesheet, relative to the public dir
pub const STYLE_PATH: &str = "css/folio.css";
/// Output path of the search index, relative to the public dir
pub const SEARCH_INDEX_PATH: &str = "search.json";

/// Browser side of search-as-you-type and the TOC scroll-spy.
///
/// Mirrors `search::filter_posts` and `scrollspy::ScrollSpy`. Empty queries
/// restore the server-rendered list and banner, searching hides pagination,
/// and a `data-tag` on the search box limits matches to that tag's posts.
/// Scroll and resize events are coalesced into one recompute per frame.
pub const SITE_SCRIPT: &str = r#"(function () {
  'use strict';

  function escapeHtml(s) {
    return String(s).replace(/[&<>"']/g, function (c) {
      return { '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;' }[c];
    });
  }

  function setupSearch(input) {
    var list = document.getElementById('post-list');
    var notFound = document.getElementById('not-found');
    var pagination = document.getElementById('pagination');
    if (!list || !notFound) return;

    var queryText = notFound.querySelector('.query');
    var initialList = list.innerHTML;
    var initialNotFound = notFound.hidden;
    var initialQuery = queryText.textContent;
    var tag = input.dataset.tag;
    var index = null;

    function card(p) {
      var tags = p.tags.map(function (t) {
        return '<li><a class="tag" href="' + escapeHtml(t.url) + '">' + escapeHtml(t.name) + '</a></li>';
      }).join('');
      return '<li class="card" data-slug="' + escapeHtml(p.slug) + '"><article>' +
        '<a class="card-title" href="' + escapeHtml(p.url) + '"><h2>' + escapeHtml(p.title) + '</h2></a>' +
        '<time datetime="' + escapeHtml(p.date) + '">' + escapeHtml(p.display_date) + '</time>' +
        (p.summary ? '<p class="card-summary">' + escapeHtml(p.summary) + '</p>' : '') +
        (tags ? '<ul class="card-tags">' + tags + '</ul>' : '') +
        '</article></li>';
    }

    function haystack(p) {
      return p.title + p.summary + p.tags.map(function (t) { return t.name; }).join(' ');
    }

    function update() {
      var query = input.value;
      if (!query) {
        list.innerHTML = initialList;
        notFound.hidden = initialNotFound;
        queryText.textContent = initialQuery;
        if (pagination) pagination.hidden = false;
        return;
      }
      if (!index) return;
      var needle = query.toLowerCase();
      var matches = index.filter(function (p) {
        return haystack(p).toLowerCase().indexOf(needle) !== -1;
      });
      list.innerHTML = matches.map(card).join('');
      queryText.textContent = '" ' + query + ' "';
      notFound.hidden = matches.length > 0;
      if (pagination) pagination.hidden = true;
    }

    fetch(document.body.dataset.searchIndex)
      .then(function (r) { return r.json(); })
      .then(function (data) {
        index = tag ? data.filter(function (p) {
          return p.tags.some(function (t) { return t.slug === tag; });
        }) : data;
        update();
      });
    input.addEventListener('input', update);
  }

  function setupScrollSpy(toc) {
    var offset = parseFloat(toc.dataset.offset) || 100;
    var links = Array.prototype.slice.call(toc.querySelectorAll('a.toc-link'));
    var targets = links.map(function (a) {
      return document.getElementById(decodeURIComponent(a.hash.slice(1)));
    });
    var pending = false;

    function topOf(el) {
      return el.getBoundingClientRect().top + window.scrollY;
    }

    function activate(index) {
      links.forEach(function (a, i) { a.classList.toggle('active', i === index); });
    }

    function frame() {
      pending = false;
      var threshold = window.scrollY + offset;
      var active = -1;
      targets.forEach(function (el, i) {
        if (el && topOf(el) <= threshold) active = i;
      });
      activate(active);
    }

    function schedule() {
      if (pending) return;
      pending = true;
      window.requestAnimationFrame(frame);
    }

    links.forEach(function (a, i) {
      a.addEventListener('click', function (e) {
        var target = targets[i];
        if (!target) return;
        e.preventDefault();
        activate(i);
        window.scrollTo({ top: topOf(target) - offset, behavior: 'smooth' });
        history.replaceState(null, '', a.hash);
      });
    });

    window.addEventListener('scroll', schedule, { passive: true });
    window.addEventListener('resize', schedule);
    window.addEventListener('pagehide', function () {
      window.removeEventListener('scroll', schedule);
      window.removeEventListener('resize', schedule);
    });
    schedule();
  }

  var input = document.getElementById('search');
  if (input) setupSearch(input);
  var toc = document.querySelector('.table-of-contents');
  if (toc) setupScrollSpy(toc);
})();
"#;

pub const SITE_STYLE: &str = r#"body { margin: 0 auto; max-width: 64rem; padding: 0 1rem; font-family: system-ui, sans-serif; }
.site-header nav a { margin-right: 1rem; }
.post-grid { display: grid; gap: 1rem; list-style: none; padding: 0; }
@media (min-width: 768px) { .post-grid { grid-template-columns: repeat(2, 1fr); } }
.card { border: 1px solid #ccc; border-radius: .5rem; padding: 1rem; }
.card-tags, .post-tags { display: flex; gap: .5rem; list-style: none; padding: 0; }
.not-found { padding: 3rem 0; text-align: center; }
.not-found .query { font-size: 1.5rem; font-weight: 500; color: #d20f39; }
.pagination { display: flex; justify-content: space-between; padding: 2rem 0; }
.post-layout { display: grid; gap: 2rem; }
@media (min-width: 1024px) { .post-layout { grid-template-columns: 3fr 1fr; } }
.post-sidebar { position: sticky; top: 100px; align-self: start; }
.table-of-contents ul { list-style: none; padding: 0; }
.toc-link.active { font-weight: 500; text-decoration: underline; color: #fe640b; }
.toc-level-3 { padding-left: 1rem; }
.site-footer { display: flex; flex-direction: column; align-items: center; margin: 4rem 0 1rem; }
.social-links, .attribution { display: flex; gap: .5rem; }
.sr-only { position: absolute; width: 1px; height: 1px; overflow: hidden; clip: rect(0 0 0 0); }
"#;

/// Per-page metadata for the document head
#[derive(Debug, Clone)]
pub struct PageMeta<'a> {
    pub title: &'a str,
    pub description: &'a str,
    /// Route of the page relative to the site root
    pub path: &'a str,
}

/// Wrap `body` in the full HTML document
pub fn render_page(config: &SiteConfig, meta: &PageMeta, body: &str, year: i32) -> String {
    let title = if meta.title == config.title {
        html_escape(&config.title)
    } else {
        format!("{} - {}", html_escape(meta.title), html_escape(&config.title))
    };
    let description = if meta.description.is_empty() {
        config.description.as_str()
    } else {
        meta.description
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta name="description" content="{description}">
<link rel="canonical" href="{canonical}">
<link rel="alternate" type="application/atom+xml" href="{feed}" title="{site_title}">
<link rel="stylesheet" href="{style}">
{generator}
</head>
<body data-search-index="{search_index}">
<header class="site-header"><nav><a href="{home}">{site_title}</a><a href="{posts}">Posts</a></nav></header>
<main>
{body}
</main>
{footer}
<script src="{script}" defer></script>
</body>
</html>
"#,
        lang = html_escape(&config.language),
        title = title,
        description = html_escape(description),
        canonical = full_url_for(config, meta.path),
        feed = url_for(config, "atom.xml"),
        site_title = html_escape(&config.title),
        style = url_for(config, STYLE_PATH),
        generator = meta_generator(),
        search_index = url_for(config, SEARCH_INDEX_PATH),
        home = url_for(config, ""),
        posts = url_for(config, &format!("{}/", config.category)),
        body = body,
        footer = render_footer(config, year),
        script = url_for(config, SCRIPT_PATH),
    )
}
