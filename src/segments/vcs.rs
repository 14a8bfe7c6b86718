//! Version control segments.

use crate::context::Context;
use crate::fragment::{Fragment, SegmentPart};
use crate::host::{Host, Repository, VcsBackend};
use crate::segments::buffer_name;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BranchOptions {
    /// Highlight as `branch_dirty` / `branch_clean` from the tree status
    #[serde(default)]
    pub status_colors: bool,
}

/// Repository of the context's file. Unnamed and special (`buftype`) buffers
/// have none.
fn repository_for(
    host: &dyn Host,
    ctx: &Context,
    vcs: &dyn VcsBackend,
    segment: &'static str,
) -> Option<(PathBuf, Box<dyn Repository>)> {
    let name = buffer_name(host, ctx, segment)?;
    let buftype = host
        .buffer_option(ctx.buffer, "buftype")
        .map(|v| v.as_text())
        .unwrap_or_default();
    if !buftype.is_empty() {
        return None;
    }
    let path = PathBuf::from(name);
    let repo = vcs.guess(&path)?;
    Some((path, repo))
}

/// Current branch of the file's repository
pub fn branch(
    host: &dyn Host,
    ctx: &Context,
    vcs: &dyn VcsBackend,
    options: &BranchOptions,
) -> Option<Fragment> {
    let (_, repo) = repository_for(host, ctx, vcs, "branch")?;
    let mut groups = vec!["branch".to_string()];
    if options.status_colors {
        let dirty = repo
            .tree_status()
            .map(|status| !status.trim().is_empty())
            .unwrap_or(false);
        groups.insert(
            0,
            if dirty { "branch_dirty" } else { "branch_clean" }.to_string(),
        );
    }
    Some(Fragment::part(
        SegmentPart::new(repo.branch())
            .with_groups(groups)
            .with_divider("branch:divider"),
    ))
}

/// One part per status flag of the file, e.g. `M` or `A`
pub fn file_vcs_status(host: &dyn Host, ctx: &Context, vcs: &dyn VcsBackend) -> Option<Fragment> {
    let (path, repo) = repository_for(host, ctx, vcs, "file_vcs_status")?;
    let relative = path.strip_prefix(repo.directory()).unwrap_or(path.as_path());
    let status = repo.status(relative)?;
    let status = status.trim();
    if status.is_empty() {
        return None;
    }
    let parts = status
        .chars()
        .map(|flag| {
            SegmentPart::new(flag.to_string()).with_groups([
                format!("file_vcs_status_{}", flag),
                "file_vcs_status".to_string(),
            ])
        })
        .collect();
    Some(Fragment::Parts(parts))
}
