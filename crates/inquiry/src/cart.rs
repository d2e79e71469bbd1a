use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use coldfront_catalog::{Product, ProductId};
use coldfront_core::{Aggregate, AggregateId, AggregateRoot, DomainError, DomainResult, Entity, Event};

/// Inquiry cart identifier (one cart per browsing session).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InquiryId(pub AggregateId);

impl InquiryId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for InquiryId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Cart line: a product snapshot and the requested quantity.
///
/// Any item present in a cart has `quantity >= 1`; an item reduced to zero is
/// removed, never retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquiryItem {
    pub product: Product,
    pub quantity: u32,
}

impl InquiryItem {
    /// Line total in smallest currency units, saturating at `u64::MAX`
    /// rather than overflowing for extreme prices.
    pub fn line_total(&self) -> u64 {
        self.product.price.saturating_mul(u64::from(self.quantity))
    }
}

impl Entity for InquiryItem {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.product.id
    }
}

/// Aggregate root: InquiryCart.
///
/// An ordered sequence of items, unique by product id. Created empty at
/// session start, mutated only through commands, cleared on successful
/// checkout submission or explicit reset. Owned by exactly one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InquiryCart {
    id: InquiryId,
    items: Vec<InquiryItem>,
    version: u64,
}

impl InquiryCart {
    /// Create an empty cart for a new browsing session.
    pub fn empty(id: InquiryId) -> Self {
        Self {
            id,
            items: Vec::new(),
            version: 0,
        }
    }

    pub fn id_typed(&self) -> InquiryId {
        self.id
    }

    pub fn items(&self) -> &[InquiryItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Requested quantity for a product, if it is in the cart.
    pub fn quantity_of(&self, product_id: ProductId) -> Option<u32> {
        self.items
            .iter()
            .find(|item| item.product.id == product_id)
            .map(|item| item.quantity)
    }

    /// Sum of line totals, saturating at `u64::MAX`. Recomputed on demand,
    /// never cached.
    pub fn subtotal(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |acc, item| acc.saturating_add(item.line_total()))
    }

    /// Total number of requested units across all items.
    pub fn total_units(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

impl AggregateRoot for InquiryCart {
    type Id = InquiryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddItem. Merges by product id rather than duplicating an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub product: Product,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SetQuantity (absolute set, not delta). Zero or negative means
/// removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetQuantity {
    pub product_id: ProductId,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveItem {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ClearCart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearCart {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InquiryCartCommand {
    AddItem(AddItem),
    SetQuantity(SetQuantity),
    RemoveItem(RemoveItem),
    ClearCart(ClearCart),
}

/// Event: ItemAdded. Also the user-visible confirmation signal for an add;
/// `apply` merges into an existing line when the product is already present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub product: Product,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: QuantityUpdated. Carries the new absolute quantity (always >= 1;
/// a set to zero is emitted as `ItemRemoved` instead).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityUpdated {
    pub product_id: ProductId,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CartCleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCleared {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InquiryCartEvent {
    ItemAdded(ItemAdded),
    QuantityUpdated(QuantityUpdated),
    ItemRemoved(ItemRemoved),
    CartCleared(CartCleared),
}

impl Event for InquiryCartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InquiryCartEvent::ItemAdded(_) => "inquiry.cart.item_added",
            InquiryCartEvent::QuantityUpdated(_) => "inquiry.cart.quantity_updated",
            InquiryCartEvent::ItemRemoved(_) => "inquiry.cart.item_removed",
            InquiryCartEvent::CartCleared(_) => "inquiry.cart.cleared",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InquiryCartEvent::ItemAdded(e) => e.occurred_at,
            InquiryCartEvent::QuantityUpdated(e) => e.occurred_at,
            InquiryCartEvent::ItemRemoved(e) => e.occurred_at,
            InquiryCartEvent::CartCleared(e) => e.occurred_at,
        }
    }
}

impl Aggregate for InquiryCart {
    type Command = InquiryCartCommand;
    type Event = InquiryCartEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            InquiryCartEvent::ItemAdded(e) => {
                match self
                    .items
                    .iter_mut()
                    .find(|item| item.product.id == e.product.id)
                {
                    // Merge semantics: never a duplicate entry for one product.
                    // `handle` rejects additions past u32::MAX, so saturation
                    // only matters for hand-built event streams.
                    Some(item) => item.quantity = item.quantity.saturating_add(e.quantity),
                    None => self.items.push(InquiryItem {
                        product: e.product.clone(),
                        quantity: e.quantity,
                    }),
                }
            }
            InquiryCartEvent::QuantityUpdated(e) => {
                if let Some(item) = self
                    .items
                    .iter_mut()
                    .find(|item| item.product.id == e.product_id)
                {
                    item.quantity = e.quantity;
                }
            }
            InquiryCartEvent::ItemRemoved(e) => {
                self.items.retain(|item| item.product.id != e.product_id);
            }
            InquiryCartEvent::CartCleared(_) => {
                self.items.clear();
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            InquiryCartCommand::AddItem(cmd) => self.handle_add(cmd),
            InquiryCartCommand::SetQuantity(cmd) => self.handle_set_quantity(cmd),
            InquiryCartCommand::RemoveItem(cmd) => self.handle_remove(cmd),
            InquiryCartCommand::ClearCart(cmd) => self.handle_clear(cmd),
        }
    }
}

impl InquiryCart {
    fn handle_add(&self, cmd: &AddItem) -> Result<Vec<InquiryCartEvent>, DomainError> {
        if cmd.quantity == 0 {
            return Err(DomainError::validation("quantity must be at least 1"));
        }

        if !cmd.product.can_be_inquired() {
            return Err(DomainError::invariant(
                "out-of-stock products cannot be added to an inquiry",
            ));
        }

        // Merge must not push the line past the representable quantity.
        let current = self.quantity_of(cmd.product.id).unwrap_or(0);
        if current.checked_add(cmd.quantity).is_none() {
            return Err(DomainError::validation(
                "requested quantity exceeds the supported maximum",
            ));
        }

        Ok(vec![InquiryCartEvent::ItemAdded(ItemAdded {
            product: cmd.product.clone(),
            quantity: cmd.quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_set_quantity(
        &self,
        cmd: &SetQuantity,
    ) -> Result<Vec<InquiryCartEvent>, DomainError> {
        if self.quantity_of(cmd.product_id).is_none() {
            // No-op: nothing to update, nothing for an observer to re-render.
            return Ok(vec![]);
        }

        if cmd.quantity <= 0 {
            return Ok(vec![InquiryCartEvent::ItemRemoved(ItemRemoved {
                product_id: cmd.product_id,
                occurred_at: cmd.occurred_at,
            })]);
        }

        let quantity = u32::try_from(cmd.quantity)
            .map_err(|_| DomainError::validation("quantity exceeds the supported maximum"))?;

        Ok(vec![InquiryCartEvent::QuantityUpdated(QuantityUpdated {
            product_id: cmd.product_id,
            quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove(&self, cmd: &RemoveItem) -> Result<Vec<InquiryCartEvent>, DomainError> {
        if self.quantity_of(cmd.product_id).is_none() {
            // No-op, not an error.
            return Ok(vec![]);
        }

        Ok(vec![InquiryCartEvent::ItemRemoved(ItemRemoved {
            product_id: cmd.product_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_clear(&self, cmd: &ClearCart) -> Result<Vec<InquiryCartEvent>, DomainError> {
        Ok(vec![InquiryCartEvent::CartCleared(CartCleared {
            occurred_at: cmd.occurred_at,
        })])
    }
}

/// Direct operations: build the command, decide, and apply the resulting
/// events in one step. The returned events are the state-transition
/// notifications for the UI observer.
impl InquiryCart {
    pub fn add(&mut self, product: Product, quantity: u32) -> DomainResult<Vec<InquiryCartEvent>> {
        self.execute(InquiryCartCommand::AddItem(AddItem {
            product,
            quantity,
            occurred_at: Utc::now(),
        }))
    }

    pub fn set_quantity(
        &mut self,
        product_id: ProductId,
        quantity: i64,
    ) -> DomainResult<Vec<InquiryCartEvent>> {
        self.execute(InquiryCartCommand::SetQuantity(SetQuantity {
            product_id,
            quantity,
            occurred_at: Utc::now(),
        }))
    }

    pub fn remove(&mut self, product_id: ProductId) -> DomainResult<Vec<InquiryCartEvent>> {
        self.execute(InquiryCartCommand::RemoveItem(RemoveItem {
            product_id,
            occurred_at: Utc::now(),
        }))
    }

    /// Clearing is unconditional, so no error path exists.
    pub fn clear(&mut self) -> Vec<InquiryCartEvent> {
        let event = InquiryCartEvent::CartCleared(CartCleared {
            occurred_at: Utc::now(),
        });
        self.apply(&event);
        vec![event]
    }

    fn execute(&mut self, command: InquiryCartCommand) -> DomainResult<Vec<InquiryCartEvent>> {
        let events = self.handle(&command)?;
        for event in &events {
            self.apply(event);
        }
        Ok(events)
    }
}
