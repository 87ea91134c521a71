use crate::decimal::Money;

/// a balance a collection can be applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceComponent {
    Penalty,
    Interest,
    Principal,
}

/// balances open at the moment a collection arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outstanding {
    pub penalty: Money,
    pub interest: Money,
    pub principal: Money,
}

/// split of one collection, plus what is left open afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Allocation {
    pub to_penalty: Money,
    pub to_interest: Money,
    pub to_principal: Money,
    pub discarded: Money,
    pub remaining: Outstanding,
}

/// fixed priority order for applying a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentWaterfall {
    order: &'static [BalanceComponent],
}

impl PaymentWaterfall {
    /// after the due date: penalty -> interest -> principal
    pub fn overdue() -> Self {
        Self {
            order: &[
                BalanceComponent::Penalty,
                BalanceComponent::Interest,
                BalanceComponent::Principal,
            ],
        }
    }

    /// up to the due date: interest -> principal
    pub fn current() -> Self {
        Self {
            order: &[BalanceComponent::Interest, BalanceComponent::Principal],
        }
    }

    pub fn order(&self) -> &'static [BalanceComponent] {
        self.order
    }

    /// apply `amount` in priority order
    ///
    /// Components outside the order are left untouched. Each balance floors at
    /// zero and whatever is left after the last component is discarded.
    pub fn allocate(&self, amount: Money, outstanding: Outstanding) -> Allocation {
        let mut allocation = Allocation {
            remaining: outstanding,
            ..Allocation::default()
        };
        let mut available = amount.max(Money::ZERO);

        for &component in self.order {
            if available.is_zero() {
                break;
            }
            available = apply_to_component(component, available, &mut allocation);
        }

        allocation.discarded = available;
        allocation
    }
}

fn apply_to_component(
    component: BalanceComponent,
    available: Money,
    allocation: &mut Allocation,
) -> Money {
    let (balance, applied) = match component {
        BalanceComponent::Penalty => {
            (&mut allocation.remaining.penalty, &mut allocation.to_penalty)
        }
        BalanceComponent::Interest => {
            (&mut allocation.remaining.interest, &mut allocation.to_interest)
        }
        BalanceComponent::Principal => {
            (&mut allocation.remaining.principal, &mut allocation.to_principal)
        }
    };

    let payment = available.min((*balance).max(Money::ZERO));
    *balance = balance.saturating_sub(payment);
    *applied = payment;

    available - payment
}
