//! Per-stage status sequences
//!
//! Every stage follows a fixed linear progression, e.g. for production:
//! pending → scheduled → in_production → completed

use crate::schemas::{
    InboundStatus, InspectionStatus, InventoryStatus, ProductionStatus, PurchaseRequestStatus,
    QualityStatus, RejectedStatus, ShipmentStatus,
};

/// A stage status with a fixed forward-only ordering.
pub trait StatusFlow: Copy + Eq + std::fmt::Debug + std::fmt::Display + 'static {
    /// The canonical ordering of statuses for the stage.
    const SEQUENCE: &'static [Self];

    /// Status a record takes when promoted into the next stage.
    const PROMOTED: Self;

    /// 0-based position in SEQUENCE, or usize::MAX for off-sequence statuses.
    fn index(self) -> usize {
        Self::SEQUENCE
            .iter()
            .position(|&s| s == self)
            .unwrap_or(usize::MAX)
    }

    /// Next status in the progression, or None at the end (or off-sequence).
    fn next(self) -> Option<Self> {
        let index = self.index();
        if index >= Self::SEQUENCE.len() - 1 {
            return None;
        }
        Some(Self::SEQUENCE[index + 1])
    }

    /// Whether no further status change is possible.
    fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Whether `target` is reachable from `self` moving only forward.
    fn precedes(self, target: Self) -> bool {
        let (from, to) = (self.index(), target.index());
        from != usize::MAX && to != usize::MAX && from < to
    }
}

impl StatusFlow for PurchaseRequestStatus {
    const SEQUENCE: &'static [Self] = &[PurchaseRequestStatus::Pending, PurchaseRequestStatus::Approved];
    const PROMOTED: Self = PurchaseRequestStatus::Approved;
}

impl StatusFlow for ProductionStatus {
    const SEQUENCE: &'static [Self] = &[
        ProductionStatus::Pending,
        ProductionStatus::Scheduled,
        ProductionStatus::InProduction,
        ProductionStatus::Completed,
    ];
    const PROMOTED: Self = ProductionStatus::Completed;
}

/// `rejected` sits outside the sequence: it is a terminal branch off `pending`.
impl StatusFlow for InspectionStatus {
    const SEQUENCE: &'static [Self] = &[InspectionStatus::Pending, InspectionStatus::Completed];
    const PROMOTED: Self = InspectionStatus::Completed;
}

impl StatusFlow for InboundStatus {
    const SEQUENCE: &'static [Self] = &[InboundStatus::Pending, InboundStatus::Completed];
    const PROMOTED: Self = InboundStatus::Completed;
}

impl StatusFlow for QualityStatus {
    const SEQUENCE: &'static [Self] = &[
        QualityStatus::PendingShipment,
        QualityStatus::PreShipment,
        QualityStatus::Shipped,
    ];
    const PROMOTED: Self = QualityStatus::Shipped;
}

impl StatusFlow for ShipmentStatus {
    const SEQUENCE: &'static [Self] = &[
        ShipmentStatus::Preparing,
        ShipmentStatus::Shipped,
        ShipmentStatus::InTransit,
        ShipmentStatus::Delivered,
    ];
    const PROMOTED: Self = ShipmentStatus::Delivered;
}

impl StatusFlow for InventoryStatus {
    const SEQUENCE: &'static [Self] = &[InventoryStatus::InStock];
    const PROMOTED: Self = InventoryStatus::InStock;
}

impl StatusFlow for RejectedStatus {
    const SEQUENCE: &'static [Self] = &[RejectedStatus::Rejected];
    const PROMOTED: Self = RejectedStatus::Rejected;
}
