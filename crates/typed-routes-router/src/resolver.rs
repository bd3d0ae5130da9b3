//! Path resolution: the one-time transform from builder nodes to resolved
//! routes.
//!
//! Resolution walks the node tree root-to-leaf, concatenating each node's
//! segment onto its ancestors' to form the full template and merging the
//! ancestors' path variable codecs into the node's own. Query parameters
//! are deliberately not accumulated; they stay local to their segment.

use std::collections::BTreeMap;

use typed_routes_codecs::SharedCodec;

use crate::builder::RouteNode;
use crate::route::Route;

/// Resolves one node against its ancestors' template and path variables,
/// then recurses into its children.
///
/// A node's own entries win on key collision, though collisions cannot
/// arise from the builder since each `:name` is declared fresh in its own
/// segment.
pub(crate) fn resolve(
    node: &RouteNode,
    ancestor_path: &str,
    ancestor_vars: &BTreeMap<String, SharedCodec>,
) -> Route {
    let full_template = format!("{ancestor_path}{}", node.segment);

    let mut path_vars = ancestor_vars.clone();
    for (name, codec) in &node.path_vars {
        path_vars.insert(name.clone(), codec.clone());
    }

    tracing::trace!(route = %node.name, template = %full_template, "resolved route");

    let sub_routes = node
        .children
        .values()
        .map(|child| (child.name.clone(), resolve(child, &full_template, &path_vars)))
        .collect();

    Route::new(
        node.name.clone(),
        node.segment.clone(),
        full_template,
        path_vars,
        node.query_params.clone(),
        sub_routes,
    )
}
