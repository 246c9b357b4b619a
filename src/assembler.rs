//! Builds priced order lines and totals from reservation prices.

use thiserror::Error;

use crate::domain::{CategoryId, OrderLine};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("cart is empty")]
    EmptyCart,
    #[error("amount overflow while pricing {category_id}")]
    AmountOverflow { category_id: CategoryId },
}

/// Priced lines and their sum, ready for authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledOrder {
    pub lines: Vec<OrderLine>,
    pub total: u64,
}

/// Accumulates one line per purchased cart item.
///
/// Linked-rule reservations are not billable and never come through here.
#[derive(Debug, Default)]
pub struct OrderAssembler {
    lines: Vec<OrderLine>,
    total: u64,
}

impl OrderAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a line priced at `unit_price`, the price returned by the reservation.
    pub fn add_line(
        &mut self,
        category_id: impl Into<CategoryId>,
        quantity: u32,
        unit_price: u64,
    ) -> Result<&OrderLine, AssemblyError> {
        let category_id = category_id.into();
        let line_total = u64::from(quantity).checked_mul(unit_price);
        let total = line_total.and_then(|line_total| self.total.checked_add(line_total));
        let (Some(line_total), Some(total)) = (line_total, total) else {
            return Err(AssemblyError::AmountOverflow { category_id });
        };

        self.total = total;
        self.lines.push(OrderLine {
            category_id,
            quantity,
            unit_price,
            line_total,
        });
        Ok(&self.lines[self.lines.len() - 1])
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn finish(self) -> Result<AssembledOrder, AssemblyError> {
        if self.lines.is_empty() {
            return Err(AssemblyError::EmptyCart);
        }
        Ok(AssembledOrder {
            lines: self.lines,
            total: self.total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_line_totals() {
        let mut assembler = OrderAssembler::new();
        assert_eq!(assembler.add_line("general", 2, 100).unwrap().line_total, 200);
        assert_eq!(assembler.add_line("vip", 1, 200).unwrap().line_total, 200);
        assert_eq!(assembler.total(), 400);

        let order = assembler.finish().unwrap();
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.total, order.lines.iter().map(|line| line.line_total).sum::<u64>());
    }

    #[test]
    fn test_empty_assembler_fails() {
        assert_eq!(OrderAssembler::new().finish(), Err(AssemblyError::EmptyCart));
    }

    #[test]
    fn test_overflow_leaves_previous_lines_intact() {
        let mut assembler = OrderAssembler::new();
        assembler.add_line("general", 1, u64::MAX).unwrap();
        assert_eq!(
            assembler.add_line("vip", 1, 1),
            Err(AssemblyError::AmountOverflow { category_id: "vip".into() })
        );
        assert_eq!(assembler.total(), u64::MAX);
    }
}
