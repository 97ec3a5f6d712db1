//! Rendering command specifications into copyable text
//!
//! Item identity (`cmd_<group>_<item>`) depends only on the position within
//! the current [`CommandSpec`]; the rendered text is recomputed from the
//! templates on every pass and never stored.

use crate::template::{substitute, TemplateVars};
use crate::types::{CommandItem, CommandSpec};

/// Stable identifier of an item within one command specification
pub fn item_id(group: usize, item: usize) -> String {
    format!("cmd_{}_{}", group, item)
}

fn parse_item_id(id: &str) -> Option<(usize, usize)> {
    let rest = id.strip_prefix("cmd_")?;
    let (group, item) = rest.split_once('_')?;
    Some((group.parse().ok()?, item.parse().ok()?))
}

/// A command item with its template resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedItem {
    pub id: String,
    pub text: String,
}

/// A group header with its resolved items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedGroup {
    pub title: String,
    pub tag: Option<String>,
    pub items: Vec<RenderedItem>,
}

/// Resolve every template in `spec` against `vars`.
pub fn render_commands(spec: &CommandSpec, vars: &TemplateVars) -> Vec<RenderedGroup> {
    spec.groups
        .iter()
        .enumerate()
        .map(|(gi, group)| RenderedGroup {
            title: group.display_title().to_string(),
            tag: group.tag.clone(),
            items: group
                .items
                .iter()
                .enumerate()
                .map(|(ii, item)| RenderedItem {
                    id: item_id(gi, ii),
                    text: substitute(&item.template, vars),
                })
                .collect(),
        })
        .collect()
}

/// Look up an item by id in the current specification.
///
/// Ids from a previous specification that no longer exist return `None`.
pub fn find_item<'a>(spec: &'a CommandSpec, id: &str) -> Option<&'a CommandItem> {
    let (group, item) = parse_item_id(id)?;
    spec.groups.get(group)?.items.get(item)
}

/// Id of the item at a flat position (all groups' items in order)
pub fn item_id_at(spec: &CommandSpec, index: usize) -> Option<String> {
    let mut remaining = index;
    for (gi, group) in spec.groups.iter().enumerate() {
        if remaining < group.items.len() {
            return Some(item_id(gi, remaining));
        }
        remaining -= group.items.len();
    }
    None
}

/// Render a single item by id
pub fn render_item(spec: &CommandSpec, id: &str, vars: &TemplateVars) -> Option<String> {
    find_item(spec, id).map(|item| substitute(&item.template, vars))
}
