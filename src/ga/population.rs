//! Reusable population storage.
//!
//! [`TourArena`] keeps a whole generation in one contiguous buffer: slot `i`
//! owns the sub-range `[i * n, (i + 1) * n)`. [`GenerationBuffers`] holds two
//! arenas and a role flag; the loop reads parents from one and writes children
//! into the other, then flips the flag. No memory is allocated after setup.

use rayon::prelude::*;

use super::types::{FitnessPool, IndividualRef};

/// Fixed-capacity generation storage backed by a single tour buffer.
#[derive(Debug, Clone)]
pub struct TourArena {
    tours: Vec<usize>,
    fitness: Vec<f64>,
    city_count: usize,
}

impl TourArena {
    /// Allocates room for `capacity` tours of `city_count` cities each.
    ///
    /// Fitness values start at `f64::INFINITY` until a slot is written.
    pub fn new(capacity: usize, city_count: usize) -> Self {
        Self {
            tours: vec![0; capacity * city_count],
            fitness: vec![f64::INFINITY; capacity],
            city_count,
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.fitness.len()
    }

    /// Tour length of every slot.
    pub fn city_count(&self) -> usize {
        self.city_count
    }

    /// The tour stored in `slot`.
    pub fn tour(&self, slot: usize) -> &[usize] {
        let start = slot * self.city_count;
        &self.tours[start..start + self.city_count]
    }

    /// Mutable access to the tour stored in `slot`.
    pub fn tour_mut(&mut self, slot: usize) -> &mut [usize] {
        let start = slot * self.city_count;
        &mut self.tours[start..start + self.city_count]
    }

    /// Records the fitness of `slot`.
    pub fn set_fitness(&mut self, slot: usize, fitness: f64) {
        self.fitness[slot] = fitness;
    }

    /// A borrowed view of the individual in `slot`.
    pub fn individual(&self, slot: usize) -> IndividualRef<'_> {
        IndividualRef {
            tour: self.tour(slot),
            fitness: self.fitness[slot],
        }
    }

    /// Iterates over all slots in order.
    pub fn individuals(&self) -> impl Iterator<Item = IndividualRef<'_>> {
        self.tours
            .chunks_exact(self.city_count.max(1))
            .zip(self.fitness.iter())
            .map(|(tour, &fitness)| IndividualRef { tour, fitness })
    }

    /// Disjoint mutable `(tour, fitness)` pairs, one per slot.
    pub fn slots_mut(&mut self) -> impl Iterator<Item = (&mut [usize], &mut f64)> {
        self.tours
            .chunks_exact_mut(self.city_count.max(1))
            .zip(self.fitness.iter_mut())
    }

    /// Parallel version of [`slots_mut`](Self::slots_mut), indexed by slot.
    ///
    /// Each item borrows a distinct sub-range, so concurrent writers can
    /// never overlap.
    pub fn par_slots_mut(
        &mut self,
    ) -> impl IndexedParallelIterator<Item = (&mut [usize], &mut f64)> {
        self.tours
            .par_chunks_exact_mut(self.city_count.max(1))
            .zip(self.fitness.par_iter_mut())
    }

    /// Index of the lowest-fitness slot; earliest slot wins ties.
    ///
    /// # Panics
    /// Panics if the arena has no slots.
    pub fn best_slot(&self) -> usize {
        assert!(self.capacity() > 0, "arena must not be empty");
        let mut best = 0;
        for (i, &f) in self.fitness.iter().enumerate().skip(1) {
            if f < self.fitness[best] {
                best = i;
            }
        }
        best
    }
}

impl FitnessPool for TourArena {
    fn len(&self) -> usize {
        self.capacity()
    }

    fn fitness(&self, idx: usize) -> f64 {
        self.fitness[idx]
    }

    fn tour(&self, idx: usize) -> &[usize] {
        TourArena::tour(self, idx)
    }
}

/// Which of the two buffers currently plays the parent role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferRole {
    /// Buffer A holds parents, buffer B receives children.
    AParents,
    /// Buffer B holds parents, buffer A receives children.
    BParents,
}

impl BufferRole {
    fn flipped(self) -> Self {
        match self {
            BufferRole::AParents => BufferRole::BParents,
            BufferRole::BParents => BufferRole::AParents,
        }
    }
}

/// Two generation buffers whose parent/child roles alternate.
///
/// The parent buffer is only reachable through a shared borrow while the
/// child buffer is borrowed mutably, so the two can never alias within a
/// generation.
#[derive(Debug, Clone)]
pub struct GenerationBuffers {
    slots: [TourArena; 2],
    role: BufferRole,
}

impl GenerationBuffers {
    /// Allocates both buffers; buffer A starts in the parent role.
    pub fn new(capacity: usize, city_count: usize) -> Self {
        Self {
            slots: [
                TourArena::new(capacity, city_count),
                TourArena::new(capacity, city_count),
            ],
            role: BufferRole::AParents,
        }
    }

    /// Current role assignment.
    pub fn role(&self) -> BufferRole {
        self.role
    }

    /// The buffer holding the current parents.
    pub fn parents(&self) -> &TourArena {
        match self.role {
            BufferRole::AParents => &self.slots[0],
            BufferRole::BParents => &self.slots[1],
        }
    }

    /// Mutable access to the parent buffer, used to seed the first generation.
    pub fn parents_mut(&mut self) -> &mut TourArena {
        match self.role {
            BufferRole::AParents => &mut self.slots[0],
            BufferRole::BParents => &mut self.slots[1],
        }
    }

    /// Borrows `(parents, children)` for one generation step.
    pub fn split(&mut self) -> (&TourArena, &mut TourArena) {
        let (a, b) = self.slots.split_at_mut(1);
        match self.role {
            BufferRole::AParents => (&a[0], &mut b[0]),
            BufferRole::BParents => (&b[0], &mut a[0]),
        }
    }

    /// Promotes the children to parents for the next generation.
    pub fn swap_roles(&mut self) {
        self.role = self.role.flipped();
    }
}
