//! Candidate path resolution: page URL path -> ordered list of source files to try.

use std::path::{Path, PathBuf};

use url::Url;

use crate::error::Error;

/// Home-page files, relative to the project root, in trial order.
const HOME_PAGE_CANDIDATES: [&str; 6] = [
    "app/page.tsx",
    "app/page.jsx",
    "pages/index.tsx",
    "pages/index.jsx",
    "src/app/page.tsx",
    "src/pages/index.tsx",
];

/// Expand a page URL path into the source files that could render it.
///
/// The root path yields the six conventional home-page files. Any other path
/// yields app-router candidates first, then pages-router candidates. Nothing
/// here touches the filesystem; the patch engine decides which candidate exists.
pub fn resolve(page_path: &str, project_root: &Path) -> Vec<PathBuf> {
    let route = page_path.trim_matches('/');
    if route.is_empty() {
        return HOME_PAGE_CANDIDATES
            .iter()
            .map(|relative| return project_root.join(relative))
            .collect();
    }

    let mut candidates = Vec::with_capacity(7);
    push_app_router_candidates(project_root, route, &mut candidates);
    push_pages_router_candidates(project_root, route, &mut candidates);
    return candidates;
}

// ── App router ─────────────────────────────────────────────────────────

/// `app/<route>/page.tsx`, its `.jsx` sibling, then the `src/app` form.
fn push_app_router_candidates(root: &Path, route: &str, candidates: &mut Vec<PathBuf>) {
    let app_dir = root.join("app").join(route);
    candidates.push(app_dir.join("page.tsx"));
    candidates.push(app_dir.join("page.jsx"));
    candidates.push(root.join("src").join("app").join(route).join("page.tsx"));
}

// ── Pages router ───────────────────────────────────────────────────────

/// `pages/<route>.tsx`, `.jsx`, the `<route>/index.tsx` form, then `src/pages`.
fn push_pages_router_candidates(root: &Path, route: &str, candidates: &mut Vec<PathBuf>) {
    let pages_dir = root.join("pages");
    candidates.push(pages_dir.join(format!("{route}.tsx")));
    candidates.push(pages_dir.join(format!("{route}.jsx")));
    candidates.push(pages_dir.join(route).join("index.tsx"));
    candidates.push(root.join("src").join("pages").join(format!("{route}.tsx")));
}

// ── Page URLs ──────────────────────────────────────────────────────────

/// Extract the path component from a full page URL or a bare path.
///
/// `http://localhost:3000/about?tab=1` and `/about#team` both give `/about`.
/// Anything without a scheme is treated as a path.
///
/// # Errors
///
/// Returns `Error::InvalidRequest` if the input has a scheme but is not a valid URL.
pub fn page_path(input: &str) -> Result<String, Error> {
    let trimmed = input.trim();
    if trimmed.contains("://") {
        let url = Url::parse(trimmed)
            .map_err(|e| return Error::invalid(format!("bad page URL `{trimmed}`: {e}")))?;
        return Ok(url.path().to_string());
    }

    let end = trimmed.find(['?', '#']).unwrap_or(trimmed.len());
    let path = trimmed.get(..end).unwrap_or(trimmed);
    return Ok(path.to_string());
}
