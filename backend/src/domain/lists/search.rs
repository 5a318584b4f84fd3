//! Item search specification.
//!
//! [`ItemSearch`] captures the recognised filter options once, so storage
//! adapters translate a single value instead of re-reading request
//! parameters. [`ItemSearch::matches`] is the reference semantics every
//! adapter must agree with:
//!
//! - `text`: case-insensitive substring of the item name or description;
//! - `categories`: the joined list's category case-insensitively contains
//!   any one of the values (no values means no constraint);
//! - `min_price` / `max_price`: inclusive bounds.

use super::ListingValidationError;
use super::item::Item;
use super::list::ListSummary;

/// Filter applied when searching items across lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemSearch {
    text: Option<String>,
    categories: Vec<String>,
    min_price: Option<f64>,
    max_price: Option<f64>,
}

impl ItemSearch {
    /// Start building a search.
    ///
    /// # Examples
    /// ```
    /// use marketplace::domain::ItemSearch;
    ///
    /// let search = ItemSearch::builder()
    ///     .text("hammer")
    ///     .category("Tools")
    ///     .category("  ")
    ///     .min_price(10.0)
    ///     .build()
    ///     .expect("finite bounds");
    /// assert_eq!(search.text(), Some("hammer"));
    /// assert_eq!(search.categories(), ["Tools".to_owned()]);
    /// assert_eq!(search.min_price(), Some(10.0));
    /// assert_eq!(search.max_price(), None);
    /// ```
    pub fn builder() -> ItemSearchBuilder {
        ItemSearchBuilder::default()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn min_price(&self) -> Option<f64> {
        self.min_price
    }

    pub fn max_price(&self) -> Option<f64> {
        self.max_price
    }

    /// Whether `item`, joined to `list`, satisfies every constraint.
    pub fn matches(&self, item: &Item, list: &ListSummary) -> bool {
        self.matches_text(item) && self.matches_price(item) && self.matches_category(list)
    }

    fn matches_text(&self, item: &Item) -> bool {
        self.text.as_deref().is_none_or(|text| {
            contains_ignore_case(item.name(), text) || contains_ignore_case(item.description(), text)
        })
    }

    fn matches_price(&self, item: &Item) -> bool {
        let price = item.price().value();
        self.min_price.is_none_or(|min| price >= min)
            && self.max_price.is_none_or(|max| price <= max)
    }

    fn matches_category(&self, list: &ListSummary) -> bool {
        self.categories.is_empty()
            || self
                .categories
                .iter()
                .any(|category| contains_ignore_case(&list.category, category))
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Builder for [`ItemSearch`]; blank text and category values are ignored.
#[derive(Debug, Clone, Default)]
pub struct ItemSearchBuilder {
    search: ItemSearch,
}

impl ItemSearchBuilder {
    /// Free-text term matched against item name and description.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.trim().is_empty() {
            self.search.text = Some(text);
        }
        self
    }

    /// Add one accepted category.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        if !category.trim().is_empty() {
            self.search.categories.push(category);
        }
        self
    }

    /// Add several accepted categories.
    #[must_use]
    pub fn categories<I, S>(self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        categories.into_iter().fold(self, Self::category)
    }

    /// Inclusive lower price bound.
    #[must_use]
    pub fn min_price(mut self, min: f64) -> Self {
        self.search.min_price = Some(min);
        self
    }

    /// Inclusive upper price bound.
    #[must_use]
    pub fn max_price(mut self, max: f64) -> Self {
        self.search.max_price = Some(max);
        self
    }

    /// Finish the search, rejecting non-finite bounds.
    pub fn build(self) -> Result<ItemSearch, ListingValidationError> {
        ensure_finite_bound(self.search.min_price, "minPrice")?;
        ensure_finite_bound(self.search.max_price, "maxPrice")?;
        Ok(self.search)
    }
}

fn ensure_finite_bound(
    bound: Option<f64>,
    field: &'static str,
) -> Result<(), ListingValidationError> {
    match bound {
        Some(value) if !value.is_finite() => {
            Err(ListingValidationError::InvalidPrice { field, value })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::{ItemDraft, ItemId, ListId, UserId};

    fn item(name: &str, description: &str, price: f64) -> Item {
        Item::new(
            ItemId::random(),
            ListId::random(),
            UserId::random(),
            ItemDraft::new(name, "http://x/photo.jpg", description, price),
        )
        .expect("valid item")
    }

    fn list(category: &str) -> ListSummary {
        ListSummary {
            id: ListId::random(),
            listname: "Garage Sale".to_owned(),
            category: category.to_owned(),
        }
    }

    #[fixture]
    fn hammer() -> Item {
        item("Claw Hammer", "forged steel", 15.0)
    }

    #[rstest]
    fn empty_search_matches_everything(hammer: Item) {
        let search = ItemSearch::builder().build().expect("valid search");
        assert!(search.matches(&hammer, &list("Tools")));
    }

    #[rstest]
    #[case("hammer", true)]
    #[case("STEEL", true)]
    #[case("saw", false)]
    fn text_matches_name_or_description(hammer: Item, #[case] text: &str, #[case] expected: bool) {
        let search = ItemSearch::builder().text(text).build().expect("valid search");
        assert_eq!(search.matches(&hammer, &list("Tools")), expected);
    }

    #[rstest]
    #[case(Some(10.0), Some(20.0), true)]
    #[case(Some(15.0), Some(15.0), true)]
    #[case(Some(15.01), None, false)]
    #[case(None, Some(14.99), false)]
    fn price_bounds_are_inclusive(
        hammer: Item,
        #[case] min: Option<f64>,
        #[case] max: Option<f64>,
        #[case] expected: bool,
    ) {
        let mut builder = ItemSearch::builder();
        if let Some(min) = min {
            builder = builder.min_price(min);
        }
        if let Some(max) = max {
            builder = builder.max_price(max);
        }
        let search = builder.build().expect("valid search");
        assert_eq!(search.matches(&hammer, &list("Tools")), expected);
    }

    #[rstest]
    #[case("electronics", true)]
    #[case("Electro", true)]
    #[case("Garden", false)]
    fn category_matches_joined_list_case_insensitively(
        hammer: Item,
        #[case] category: &str,
        #[case] expected: bool,
    ) {
        let search = ItemSearch::builder()
            .category(category)
            .build()
            .expect("valid search");
        assert_eq!(search.matches(&hammer, &list("Electronics")), expected);
    }

    #[rstest]
    fn any_requested_category_is_enough(hammer: Item) {
        let search = ItemSearch::builder()
            .categories(["Garden", "tools"])
            .build()
            .expect("valid search");
        assert!(search.matches(&hammer, &list("Tools")));
    }

    #[rstest]
    fn blank_values_are_ignored() {
        let search = ItemSearch::builder()
            .text("   ")
            .categories(["", " "])
            .build()
            .expect("valid search");
        assert_eq!(search, ItemSearch::default());
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn non_finite_bounds_are_rejected(#[case] bound: f64) {
        let err = ItemSearch::builder()
            .max_price(bound)
            .build()
            .expect_err("invalid bound");
        assert_eq!(err.field(), "maxPrice");
    }
}
