//! Contact records produced by controller ray casts.

use glam::Vec3;

/// One ray/box contact: where a controller ray entered a movable box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactRecord {
    /// Hit point in world space.
    pub point: Vec3,
    /// Marker color (RGBA), chosen per controller.
    pub color: [f32; 4],
    /// Index of the hit box in the movable collection.
    pub box_index: usize,
    /// Controller slot that produced the hit.
    pub controller: usize,
}

/// The live set of contact records, shared by all controller slots.
///
/// Records are appended as rays hit boxes and removed per controller when
/// a ray stops hitting or a grab ends. Removal keeps the relative order of
/// the surviving records.
#[derive(Debug, Default)]
pub struct ContactRegistry {
    records: Vec<ContactRecord>,
}

impl ContactRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record.
    pub fn insert(&mut self, record: ContactRecord) {
        self.records.push(record);
    }

    /// Removes every record belonging to `controller`.
    ///
    /// Survivors keep their relative order. Removing for a controller with
    /// no records is a no-op.
    pub fn remove_for_controller(&mut self, controller: usize) {
        self.records.retain(|r| r.controller != controller);
    }

    /// Iterates the records belonging to `controller`.
    pub fn iter_controller(&self, controller: usize) -> impl Iterator<Item = &ContactRecord> {
        self.records.iter().filter(move |r| r.controller == controller)
    }

    /// Mutably iterates the records belonging to `controller`, leaving the
    /// other controllers' records untouched.
    pub fn iter_controller_mut(
        &mut self,
        controller: usize,
    ) -> impl Iterator<Item = &mut ContactRecord> {
        self.records
            .iter_mut()
            .filter(move |r| r.controller == controller)
    }

    /// Returns true if `controller` owns at least one record.
    pub fn has_controller(&self, controller: usize) -> bool {
        self.records.iter().any(|r| r.controller == controller)
    }

    /// All live records in insertion order.
    pub fn records(&self) -> &[ContactRecord] {
        &self.records
    }

    /// Number of live records across all controllers.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no records exist.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(controller: usize, box_index: usize) -> ContactRecord {
        ContactRecord {
            point: Vec3::ZERO,
            color: [1.0, 0.0, 0.0, 1.0],
            box_index,
            controller,
        }
    }

    #[test]
    fn test_remove_preserves_order_of_survivors() {
        let mut registry = ContactRegistry::new();
        registry.insert(record(0, 0));
        registry.insert(record(1, 1));
        registry.insert(record(0, 2));
        registry.insert(record(1, 3));

        registry.remove_for_controller(0);

        let boxes: Vec<usize> = registry.records().iter().map(|r| r.box_index).collect();
        assert_eq!(boxes, vec![1, 3]);
        assert!(registry.records().iter().all(|r| r.controller == 1));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut registry = ContactRegistry::new();
        registry.insert(record(0, 0));
        registry.insert(record(1, 1));

        registry.remove_for_controller(0);
        assert_eq!(registry.len(), 1);

        // Second removal finds nothing and changes nothing.
        registry.remove_for_controller(0);
        assert_eq!(registry.len(), 1);
        assert!(registry.has_controller(1));
        assert!(!registry.has_controller(0));
    }

    #[test]
    fn test_mutation_touches_only_matching_records() {
        let mut registry = ContactRegistry::new();
        registry.insert(record(0, 0));
        registry.insert(record(1, 1));
        registry.insert(record(0, 2));

        for r in registry.iter_controller_mut(0) {
            r.point = Vec3::ONE;
        }

        assert_eq!(registry.records()[0].point, Vec3::ONE);
        assert_eq!(registry.records()[1].point, Vec3::ZERO);
        assert_eq!(registry.records()[2].point, Vec3::ONE);
    }

    #[test]
    fn test_shared_box_across_controllers() {
        let mut registry = ContactRegistry::new();
        registry.insert(record(0, 5));
        registry.insert(record(1, 5));

        assert_eq!(registry.iter_controller(0).count(), 1);
        assert_eq!(registry.iter_controller(1).count(), 1);

        registry.remove_for_controller(1);
        assert_eq!(registry.records()[0].box_index, 5);
        assert_eq!(registry.records()[0].controller, 0);
    }
}
