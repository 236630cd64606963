use ld19_data::Point;
use parking_lot::RwLock;

/// Fixed-capacity ring of the most recent points.
///
/// One writer pushes, any number of readers take snapshots. Each point is
/// written whole under the lock, so a snapshot never sees a torn point. Once
/// full, every push overwrites the oldest slot.
pub struct PointBuffer {
    ring: RwLock<Ring>,
}

struct Ring {
    slots: Vec<Point>,
    /// Slot holding the oldest point once the ring is full.
    head: usize,
    capacity: usize,
}

impl Ring {
    fn push(&mut self, point: Point) {
        if self.slots.len() < self.capacity {
            self.slots.push(point);
        } else {
            self.slots[self.head] = point;
            self.head = (self.head + 1) % self.capacity;
        }
    }
}

impl PointBuffer {
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> PointBuffer {
        assert!(capacity > 0, "point buffer capacity must be positive");
        PointBuffer {
            ring: RwLock::new(Ring {
                slots: Vec::with_capacity(capacity),
                head: 0,
                capacity,
            }),
        }
    }

    pub fn push(&self, point: Point) {
        self.ring.write().push(point);
    }

    /// Pushes a batch under a single lock acquisition.
    pub fn extend<I: IntoIterator<Item = Point>>(&self, points: I) {
        let mut ring = self.ring.write();
        for point in points {
            ring.push(point);
        }
    }

    /// Copy of the held points, oldest first.
    pub fn snapshot(&self) -> Vec<Point> {
        let ring = self.ring.read();
        let mut points = Vec::with_capacity(ring.slots.len());
        points.extend_from_slice(&ring.slots[ring.head..]);
        points.extend_from_slice(&ring.slots[..ring.head]);
        points
    }

    pub fn len(&self) -> usize {
        self.ring.read().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.ring.read().capacity
    }
}
