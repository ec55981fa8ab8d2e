//! Orders held open between requests.

use std::collections::{HashMap, VecDeque};

use common::OrderId;
use domain::Order;

/// Default cap on orders kept open at once.
pub const DEFAULT_MAX_OPEN_ORDERS: usize = 1024;

/// Orders being assembled, bounded by a maximum count.
///
/// Orders leave when discarded. When the cap is reached, opening another
/// order drops the one opened earliest, so abandoned orders cannot pile up.
#[derive(Debug)]
pub struct OpenOrders {
    orders: HashMap<OrderId, Order>,
    opened: VecDeque<OrderId>,
    limit: usize,
}

impl OpenOrders {
    /// Creates an empty set holding at most `limit` orders (at least one).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            orders: HashMap::new(),
            opened: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    /// Stores a newly opened order, returning the id of any order evicted to
    /// make room.
    pub fn open(&mut self, order: Order) -> Option<OrderId> {
        let evicted = if self.orders.len() >= self.limit {
            self.opened.pop_front().inspect(|oldest| {
                self.orders.remove(oldest);
            })
        } else {
            None
        };

        self.opened.push_back(order.id());
        self.orders.insert(order.id(), order);
        evicted
    }

    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.get(id)
    }

    pub fn get_mut(&mut self, id: &OrderId) -> Option<&mut Order> {
        self.orders.get_mut(id)
    }

    pub fn remove(&mut self, id: &OrderId) -> Option<Order> {
        let order = self.orders.remove(id)?;
        self.opened.retain(|opened| opened != id);
        Some(order)
    }

    pub fn contains(&self, id: &OrderId) -> bool {
        self.orders.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for OpenOrders {
    fn default() -> Self {
        Self::with_limit(DEFAULT_MAX_OPEN_ORDERS)
    }
}
