//! Text-encoded id lists and the catalog lookups built on them.
//!
//! Menus, dishes, products and users reference each other through
//! comma-joined id lists stored as plain text. Every list is decoded here so
//! the rest of the system never splits strings itself. Unparseable tokens and
//! ids that no longer resolve are skipped, never reported.

use std::collections::BTreeSet;

use crate::types::DbId;

/// Separator used when encoding id lists.
pub const ID_SEPARATOR: char = ',';

/// Decode a comma-delimited id list, keeping order and dropping empty or
/// non-numeric tokens.
///
/// ```
/// use canteen_core::catalog::resolve_ids;
/// assert_eq!(resolve_ids("3, 7,  9"), vec![3, 7, 9]);
/// assert_eq!(resolve_ids("a,3,"), vec![3]);
/// ```
pub fn resolve_ids(text: &str) -> Vec<DbId> {
    text.split(ID_SEPARATOR).filter_map(parse_token).collect()
}

/// Encode ids as a comma-delimited list (no spaces).
pub fn join_ids(ids: &[DbId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Union of the allergen lists of every resolved product of a dish.
///
/// Callers pass only the products that still exist; a dangling product id
/// simply contributes nothing.
pub fn union_allergens<'a, I>(product_allergen_lists: I) -> BTreeSet<DbId>
where
    I: IntoIterator<Item = &'a str>,
{
    product_allergen_lists
        .into_iter()
        .flat_map(resolve_ids)
        .collect()
}

/// `true` if the user is allergic to anything the dish contains.
pub fn has_allergen_conflict(user_allergens: &BTreeSet<DbId>, dish_allergens: &BTreeSet<DbId>) -> bool {
    !user_allergens.is_disjoint(dish_allergens)
}

/// Pair the parallel product / amount lists of a procurement application.
///
/// Lists are matched by position and truncated to the shorter one. A position
/// where either token does not parse is skipped; amounts must fit the
/// `INTEGER` stock column.
pub fn pair_products_with_amounts(products: &str, amounts: &str) -> Vec<(DbId, i32)> {
    products
        .split(ID_SEPARATOR)
        .zip(amounts.split(ID_SEPARATOR))
        .filter_map(|(p, a)| Some((parse_token(p)?, parse_amount(a)?)))
        .collect()
}

/// A non-negative stock amount, or `None` for blank, non-numeric or
/// out-of-range tokens.
pub fn parse_amount(token: &str) -> Option<i32> {
    parse_token(token)
}

fn parse_token<T: std::str::FromStr>(token: &str) -> Option<T> {
    let token = token.trim();
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}
