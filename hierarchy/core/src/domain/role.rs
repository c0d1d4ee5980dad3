// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Role-name conventions and the directional traversal predicate.
//!
//! Role names carry the only directionality information in the
//! relationship graph. [`is_traversable`] is what keeps the gathering
//! recursion walking strictly downward: it refuses upward edges
//! (`*Superior`), provider edges (`*Provider`), logical inverses
//! (`ConverseOf*`), and the degenerate self-edge, so a traversal never
//! climbs back up the path it just came down or follows the inverse of
//! an edge twice.

use crate::domain::org::RoleCode;

pub const SUBORDINATE_ROLE: &str = "Subordinate";
pub const ADMIN_SUBORDINATE_ROLE: &str = "AdministrativeSubordinate";

pub const SUPERIOR_SUFFIX: &str = "Superior";
pub const PROVIDER_SUFFIX: &str = "Provider";
pub const CONVERSE_OF_PREFIX: &str = "ConverseOf";
pub const SELF_ROLE: &str = "Self";

/// True when an edge with this role may be recursed into.
pub fn is_traversable(role: &str) -> bool {
    !role.ends_with(SUPERIOR_SUFFIX)
        && !role.ends_with(PROVIDER_SUFFIX)
        && !role.starts_with(CONVERSE_OF_PREFIX)
        && role != SELF_ROLE
}

/// True when the role denotes the self-relation. Such edges are never
/// listed on an assembled node.
pub fn is_self_role(role: &str) -> bool {
    role.ends_with(SELF_ROLE)
}

/// True for the subordinate role classes that a reduced-relationship
/// query is restricted to.
pub fn is_subordinate_class(role: &str) -> bool {
    role.eq_ignore_ascii_case(SUBORDINATE_ROLE) || role.eq_ignore_ascii_case(ADMIN_SUBORDINATE_ROLE)
}

/// Reduces a role name to the coarse two-valued code. Anything that is
/// not recognizably administrative falls into the plain subordinate
/// bucket.
pub fn reduce(role: &str) -> RoleCode {
    if role.eq_ignore_ascii_case(ADMIN_SUBORDINATE_ROLE) {
        RoleCode::AdminSubordinate
    } else {
        RoleCode::Subordinate
    }
}
