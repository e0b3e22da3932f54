//! Ordered Collection Editor
//!
//! Client-held editing state for one section. Every mutation is local and
//! synchronous; `save` is the only operation that leaves the process, and it
//! always sends the whole collection.
//!
//! Invariant: after every mutation `items[i].order() == i`.

use async_trait::async_trait;
use thiserror::Error;

use crate::error::ApiError;
use crate::order::{move_within, normalize, renumber};
use crate::record::{validate_all, FieldError, SectionRecord};
use crate::validation::ValidationErrors;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CollectionError {
    #[error("no item at position {index} (collection has {len})")]
    OutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("cannot save: {0}")]
    Invalid(ValidationErrors),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Persistence collaborator for one section: load it, or replace it whole
#[async_trait(?Send)]
pub trait SectionClient<T: SectionRecord> {
    async fn load(&self) -> Result<Vec<T>, ApiError>;

    /// Replace the stored collection; returns what the backend now holds
    async fn replace_all(&self, items: &[T]) -> Result<Vec<T>, ApiError>;
}

/// Snapshot handed out by `begin_save`, numbered in issue order
#[derive(Debug, Clone, PartialEq)]
pub struct SaveTicket<T> {
    pub generation: u64,
    pub items: Vec<T>,
}

/// What `finish_save` did with a successful response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Latest save; the stored collection replaced local state
    Adopted,
    /// A newer save was issued meanwhile; the response was dropped
    Superseded,
}

/// Editing state for one ordered section
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedCollection<T> {
    items: Vec<T>,
    in_flight: u32,
    issued: u64,
    last_error: Option<String>,
}

impl<T> Default for OrderedCollection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            in_flight: 0,
            issued: 0,
            last_error: None,
        }
    }
}

impl<T: SectionRecord> OrderedCollection<T> {
    /// Adopt initial data, normalizing any gaps or duplicate orders
    pub fn new(mut initial: Vec<T>) -> Self {
        normalize(&mut initial);
        Self {
            items: initial,
            ..Default::default()
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// True while at least one save is awaiting its response
    pub fn is_saving(&self) -> bool {
        self.in_flight > 0
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn check_index(&self, index: usize) -> Result<(), CollectionError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(CollectionError::OutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }

    /// Append a placeholder record; returns its position
    pub fn add(&mut self) -> usize {
        let position = self.items.len();
        self.items.push(T::placeholder(position as u32));
        position
    }

    /// Append a prepared record; its order is overwritten
    pub fn add_item(&mut self, mut item: T) -> usize {
        let position = self.items.len();
        item.set_order(position as u32);
        self.items.push(item);
        position
    }

    /// Replace one field of the record at `index` from raw input
    pub fn update(&mut self, index: usize, field: &str, value: &str) -> Result<(), CollectionError> {
        self.check_index(index)?;
        self.items[index].set_field(field, value)?;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<T, CollectionError> {
        self.check_index(index)?;
        let removed = self.items.remove(index);
        renumber(&mut self.items);
        Ok(removed)
    }

    /// Move the record at `source` so it ends up at `dest`
    pub fn reorder(&mut self, source: usize, dest: usize) -> Result<(), CollectionError> {
        self.check_index(source)?;
        self.check_index(dest)?;
        move_within(&mut self.items, source, dest);
        renumber(&mut self.items);
        Ok(())
    }

    /// Validate and snapshot the collection for sending.
    ///
    /// Validation failures never reach the network and do not mark the
    /// collection as saving.
    pub fn begin_save(&mut self) -> Result<SaveTicket<T>, CollectionError> {
        renumber(&mut self.items);
        if let Err(errors) = validate_all(&self.items) {
            self.last_error = Some(errors.to_string());
            return Err(CollectionError::Invalid(errors));
        }
        self.in_flight += 1;
        self.issued += 1;
        self.last_error = None;
        Ok(SaveTicket {
            generation: self.issued,
            items: self.items.clone(),
        })
    }

    /// Apply the backend's answer to the save numbered `generation`.
    ///
    /// Only the most recently issued save may replace local state, so a slow
    /// response to an older snapshot never overwrites a newer one. Failures
    /// leave local state as it is so the user can retry.
    pub fn finish_save(
        &mut self,
        generation: u64,
        outcome: Result<Vec<T>, ApiError>,
    ) -> Result<SaveOutcome, CollectionError> {
        self.in_flight = self.in_flight.saturating_sub(1);
        let latest = generation == self.issued;
        match outcome {
            Ok(_) if !latest => Ok(SaveOutcome::Superseded),
            Ok(stored) => {
                self.items = stored;
                normalize(&mut self.items);
                self.last_error = None;
                Ok(SaveOutcome::Adopted)
            }
            Err(err) => {
                if latest {
                    self.last_error = Some(err.to_string());
                }
                Err(CollectionError::Api(err))
            }
        }
    }

    /// Send the whole collection through `client` and adopt the result
    pub async fn save<C: SectionClient<T> + ?Sized>(&mut self, client: &C) -> Result<(), CollectionError> {
        let ticket = self.begin_save()?;
        let outcome = client.replace_all(&ticket.items).await;
        self.finish_save(ticket.generation, outcome).map(|_| ())
    }

    /// Discard local state and reload from the backend
    pub async fn refresh<C: SectionClient<T> + ?Sized>(&mut self, client: &C) -> Result<(), CollectionError> {
        let loaded = client.load().await?;
        self.items = loaded;
        normalize(&mut self.items);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::{ServiceCard, Testimonial};
    use std::cell::RefCell;

    fn card(title: &str, order: u32) -> ServiceCard {
        ServiceCard {
            id: None,
            title: title.to_string(),
            description: "d".to_string(),
            icon: String::new(),
            image_url: String::new(),
            order,
        }
    }

    fn titles(c: &OrderedCollection<ServiceCard>) -> Vec<String> {
        c.items().iter().map(|i| i.title.clone()).collect()
    }

    fn assert_dense(c: &OrderedCollection<ServiceCard>) {
        for (i, item) in c.items().iter().enumerate() {
            assert_eq!(item.order, i as u32, "order mismatch at {}", i);
        }
    }

    /// Replace-all backend held in memory; assigns ids like a document store
    struct MemoryBackend {
        stored: RefCell<Vec<ServiceCard>>,
        next_id: RefCell<u32>,
        fail: RefCell<bool>,
    }

    impl MemoryBackend {
        fn new() -> Self {
            Self {
                stored: RefCell::new(Vec::new()),
                next_id: RefCell::new(1),
                fail: RefCell::new(false),
            }
        }
    }

    #[async_trait(?Send)]
    impl SectionClient<ServiceCard> for MemoryBackend {
        async fn load(&self) -> Result<Vec<ServiceCard>, ApiError> {
            Ok(self.stored.borrow().clone())
        }

        async fn replace_all(&self, items: &[ServiceCard]) -> Result<Vec<ServiceCard>, ApiError> {
            if *self.fail.borrow() {
                return Err(ApiError::Network("connection reset".to_string()));
            }
            let mut next = self.next_id.borrow_mut();
            let stored: Vec<ServiceCard> = items
                .iter()
                .cloned()
                .map(|mut item| {
                    if item.id.is_none() {
                        item.id = Some(next.to_string());
                        *next += 1;
                    }
                    item
                })
                .collect();
            *self.stored.borrow_mut() = stored.clone();
            Ok(stored)
        }
    }

    fn abc() -> OrderedCollection<ServiceCard> {
        OrderedCollection::new(vec![card("A", 0), card("B", 1), card("C", 2)])
    }

    #[test]
    fn test_remove_renumbers() {
        let mut c = abc();
        c.remove(1).unwrap();
        assert_eq!(titles(&c), vec!["A", "C"]);
        assert_eq!(c.items()[0].order, 0);
        assert_eq!(c.items()[1].order, 1);
    }

    #[test]
    fn test_add_uses_placeholder_and_next_order() {
        let mut c = OrderedCollection::new(vec![card("A", 0), card("B", 1)]);
        let position = c.add();
        assert_eq!(position, 2);
        let added = &c.items()[2];
        assert_eq!(added.title, "New Item");
        assert_eq!(added.order, 2);
        assert!(added.id.is_none());
    }

    #[test]
    fn test_reorder_forward_shifts_range_left() {
        let mut c = OrderedCollection::new(
            ["A", "B", "C", "D", "E"].iter().enumerate().map(|(i, t)| card(t, i as u32)).collect(),
        );
        c.reorder(1, 3).unwrap();
        assert_eq!(titles(&c), vec!["A", "C", "D", "B", "E"]);
        assert_dense(&c);
    }

    #[test]
    fn test_reorder_backward() {
        let mut c = abc();
        c.reorder(2, 0).unwrap();
        assert_eq!(titles(&c), vec!["C", "A", "B"]);
        assert_dense(&c);
    }

    #[test]
    fn test_out_of_range_is_reported_and_state_kept() {
        let mut c = abc();
        assert_eq!(
            c.remove(3),
            Err(CollectionError::OutOfRange { index: 3, len: 3 })
        );
        assert!(c.reorder(0, 5).is_err());
        assert!(c.update(9, "title", "x").is_err());
        assert_eq!(titles(&c), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_update_field_by_position() {
        let mut c = abc();
        c.update(1, "description", "Managed cloud").unwrap();
        assert_eq!(c.items()[1].description, "Managed cloud");
        assert!(matches!(
            c.update(1, "price", "1"),
            Err(CollectionError::Field(FieldError::Unknown(_)))
        ));
    }

    #[test]
    fn test_update_coerces_numeric_fields() {
        let mut c = OrderedCollection::new(vec![Testimonial::placeholder(0)]);
        c.update(0, "rating", "3").unwrap();
        assert_eq!(c.items()[0].rating, 3);
        assert!(c.update(0, "rating", "abc").is_err());
    }

    #[test]
    fn test_new_normalizes_incoming_order() {
        let c = OrderedCollection::new(vec![card("B", 4), card("A", 1)]);
        assert_eq!(titles(&c), vec!["A", "B"]);
        assert_dense(&c);
    }

    enum Op {
        Add,
        Remove(usize),
        Reorder(usize, usize),
    }

    #[test]
    fn test_order_dense_after_mixed_sequence() {
        let mut c = abc();
        let ops = [
            Op::Add,
            Op::Reorder(3, 0),
            Op::Remove(2),
            Op::Add,
            Op::Reorder(0, 3),
            Op::Remove(0),
        ];
        for op in ops {
            match op {
                Op::Add => {
                    c.add();
                }
                Op::Remove(i) => {
                    c.remove(i).unwrap();
                }
                Op::Reorder(from, to) => c.reorder(from, to).unwrap(),
            }
            assert_dense(&c);
        }
        assert_eq!(titles(&c), vec!["C", "New Item", "New Item"]);
    }

    #[test]
    fn test_begin_save_blocks_invalid_records() {
        let mut c = abc();
        c.update(0, "title", " ").unwrap();
        let err = c.begin_save().unwrap_err();
        assert!(matches!(err, CollectionError::Invalid(_)));
        assert!(!c.is_saving());
        assert!(c.last_error().unwrap().contains("items[0].title"));
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let backend = MemoryBackend::new();
        let mut c = abc();
        c.save(&backend).await.unwrap();
        assert!(!c.is_saving());

        let mut reloaded = OrderedCollection::<ServiceCard>::default();
        reloaded.refresh(&backend).await.unwrap();
        assert_eq!(reloaded.items(), c.items());
        assert!(reloaded.items().iter().all(|item| item.id.is_some()));
    }

    #[tokio::test]
    async fn test_removed_item_not_resurrected() {
        let backend = MemoryBackend::new();
        let mut c = abc();
        c.save(&backend).await.unwrap();

        c.remove(1).unwrap();
        c.save(&backend).await.unwrap();

        let mut reloaded = OrderedCollection::<ServiceCard>::default();
        reloaded.refresh(&backend).await.unwrap();
        assert_eq!(titles(&reloaded), vec!["A", "C"]);
    }

    #[tokio::test]
    async fn test_sequential_saves_last_wins_without_merge() {
        let backend = MemoryBackend::new();

        let mut first = OrderedCollection::new(vec![card("A1", 0), card("A2", 1), card("A3", 2)]);
        let mut second = OrderedCollection::new(vec![card("B1", 0)]);
        first.save(&backend).await.unwrap();
        second.save(&backend).await.unwrap();

        let stored = backend.load().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "B1");
    }

    #[tokio::test]
    async fn test_failed_save_keeps_local_state() {
        let backend = MemoryBackend::new();
        *backend.fail.borrow_mut() = true;

        let mut c = abc();
        c.add();
        c.update(3, "description", "Round-the-clock support").unwrap();
        let before = c.items().to_vec();
        let err = c.save(&backend).await.unwrap_err();
        assert!(matches!(err, CollectionError::Api(ApiError::Network(_))));
        assert_eq!(c.items(), before.as_slice());
        assert!(!c.is_saving());
        assert!(c.last_error().is_some());

        *backend.fail.borrow_mut() = false;
        c.save(&backend).await.unwrap();
        assert_eq!(backend.load().await.unwrap().len(), 4);
    }

    #[test]
    fn test_overlapping_saves_track_in_flight() {
        let mut c = abc();
        let first = c.begin_save().unwrap();
        c.remove(0).unwrap();
        let second = c.begin_save().unwrap();
        assert!(c.is_saving());
        assert!(second.generation > first.generation);

        assert_eq!(
            c.finish_save(second.generation, Ok(second.items.clone())),
            Ok(SaveOutcome::Adopted)
        );
        assert!(c.is_saving());
        assert_eq!(
            c.finish_save(first.generation, Ok(first.items)),
            Ok(SaveOutcome::Superseded)
        );
        assert!(!c.is_saving());
        // the backend processed the newer snapshot last
        assert_eq!(titles(&c), vec!["B", "C"]);
    }

    #[test]
    fn test_stale_response_arriving_first_is_not_adopted() {
        let mut c = abc();
        let first = c.begin_save().unwrap();
        c.update(0, "title", "A2").unwrap();
        let second = c.begin_save().unwrap();

        c.finish_save(first.generation, Ok(first.items)).unwrap();
        assert_eq!(titles(&c), vec!["A2", "B", "C"]);

        c.finish_save(second.generation, Ok(second.items)).unwrap();
        assert_eq!(titles(&c), vec!["A2", "B", "C"]);
        assert!(!c.is_saving());
    }

    #[test]
    fn test_stale_failure_does_not_flag_newer_save() {
        let mut c = abc();
        let first = c.begin_save().unwrap();
        let second = c.begin_save().unwrap();
        c.finish_save(second.generation, Ok(second.items)).unwrap();

        let err = c
            .finish_save(first.generation, Err(ApiError::Network("timeout".to_string())))
            .unwrap_err();
        assert!(matches!(err, CollectionError::Api(ApiError::Network(_))));
        assert!(c.last_error().is_none());
    }

    #[tokio::test]
    async fn test_remove_is_local_until_save() {
        let backend = MemoryBackend::new();
        let mut c = abc();
        c.save(&backend).await.unwrap();

        c.update(0, "title", "Edited").unwrap();
        c.remove(1).unwrap();
        assert_eq!(backend.load().await.unwrap().len(), 3);

        // discarding local edits brings the removed record back
        c.refresh(&backend).await.unwrap();
        assert_eq!(titles(&c), vec!["A", "B", "C"]);

        c.remove(1).unwrap();
        c.save(&backend).await.unwrap();
        let stored: Vec<String> = backend.load().await.unwrap().into_iter().map(|i| i.title).collect();
        assert_eq!(stored, vec!["A", "C"]);
    }
}
