use coldfront_catalog::{
    CatalogIndex, FacetValues, FilterSelection, Product, ProductId, SortKey, filter, sort,
};
use coldfront_core::{AggregateId, DomainError, DomainResult, SessionId};
use coldfront_inquiry::{
    CheckoutError, ContactFields, InquiryCart, InquiryCartEvent, InquiryId, OutboundOrder,
    checkout,
};

/// Session-scoped storefront state: the catalog snapshot, the active
/// filter/sort controls, and the inquiry cart.
///
/// This is the explicitly-passed, single-owner handle the UI threads through
/// its entry points; there is no ambient global cart. Every operation runs
/// synchronously to completion, and the events returned from cart mutations
/// tell the observing UI what to re-render.
#[derive(Debug)]
pub struct StorefrontSession {
    id: SessionId,
    catalog: CatalogIndex,
    selection: FilterSelection,
    sort_key: SortKey,
    cart: InquiryCart,
}

impl StorefrontSession {
    /// Start a session over a catalog snapshot with an empty cart and
    /// unconstrained controls.
    pub fn new(catalog: CatalogIndex) -> Self {
        let id = SessionId::new();
        tracing::debug!(session = %id, products = catalog.len(), "storefront session started");
        Self {
            id,
            catalog,
            selection: FilterSelection::default(),
            sort_key: SortKey::default(),
            cart: InquiryCart::empty(InquiryId::new(AggregateId::new())),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn catalog(&self) -> &CatalogIndex {
        &self.catalog
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn cart(&self) -> &InquiryCart {
        &self.cart
    }

    /// Replace the catalog snapshot (the data layer pushed a fresh one).
    /// Filter and sort controls carry over; the next `visible_products` call
    /// recomputes against the new snapshot.
    pub fn replace_catalog(&mut self, catalog: CatalogIndex) {
        tracing::debug!(session = %self.id, products = catalog.len(), "catalog snapshot replaced");
        self.catalog = catalog;
    }

    pub fn set_selection(&mut self, selection: FilterSelection) {
        self.selection = selection;
    }

    pub fn set_sort_key(&mut self, sort_key: SortKey) {
        self.sort_key = sort_key;
    }

    /// The rendered listing: filter, then sort. Recomputed on every call;
    /// catalog sizes are small enough that caching buys nothing.
    pub fn visible_products(&self) -> Vec<Product> {
        sort(filter(self.catalog.products(), &self.selection), self.sort_key)
    }

    /// Distinct facet values for populating the filter controls.
    pub fn facet_values(&self) -> FacetValues {
        self.catalog.facet_values()
    }

    /// Add a catalog product to the inquiry cart.
    ///
    /// Fails with `NotFound` for an unknown id; quantity and stock rules are
    /// enforced by the cart itself.
    pub fn add_to_inquiry(
        &mut self,
        product_id: ProductId,
        quantity: u32,
    ) -> DomainResult<Vec<InquiryCartEvent>> {
        let product = self
            .catalog
            .get(product_id)
            .cloned()
            .ok_or(DomainError::NotFound)?;

        let events = self.cart.add(product, quantity)?;
        tracing::info!(
            session = %self.id,
            product = %product_id,
            quantity,
            cart_items = self.cart.len(),
            "product added to inquiry"
        );
        Ok(events)
    }

    /// Set an item's quantity (zero or negative removes it).
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> DomainResult<Vec<InquiryCartEvent>> {
        self.cart.set_quantity(product_id, quantity)
    }

    pub fn remove_from_inquiry(
        &mut self,
        product_id: ProductId,
    ) -> DomainResult<Vec<InquiryCartEvent>> {
        self.cart.remove(product_id)
    }

    /// Explicit reset of the inquiry list. Unconditional, so no error path.
    pub fn reset_inquiry(&mut self) -> Vec<InquiryCartEvent> {
        self.cart.clear()
    }

    /// Validate and serialize the current cart + contact fields into an
    /// outbound order, clearing the cart only on success.
    pub fn submit_inquiry(
        &mut self,
        contact: &ContactFields,
    ) -> Result<OutboundOrder, CheckoutError> {
        match checkout::prepare(&self.cart, contact) {
            Ok(order) => {
                // Clear only after a successful preparation; a failed submit
                // leaves the cart intact for the user to fix and retry.
                self.cart.clear();
                tracing::info!(
                    session = %self.id,
                    lines = order.lines.len(),
                    total = order.total,
                    "inquiry submitted"
                );
                Ok(order)
            }
            Err(err) => {
                tracing::warn!(session = %self.id, issues = err.issues.len(), "inquiry submission rejected");
                Err(err)
            }
        }
    }
}
