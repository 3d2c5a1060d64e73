//! Ownership of detected wall markers.

use std::collections::HashMap;
use std::fmt;

use classroom_types::{DEFAULT_MIN_FLOOR_AREA, FloorPlane, ReferenceRole, ReferenceSample};
use glam::DVec3;
use tracing::{debug, trace, warn};

use crate::derive::derive_frame;
use crate::error::{FrameError, Result};
use crate::frame::RoomFrame;
use crate::snap::{SnapParams, snap_to_floor};

type FrameListener = Box<dyn Fn(&RoomFrame) + Send>;

/// Detected markers, the floor they rest on, and the frame they imply.
///
/// The registry is the single writer for marker state: every mutation takes
/// `&mut self`. Hosts that receive detections on several threads wrap it in
/// a `Mutex` and funnel updates through it.
///
/// After each mutation the room frame is recomputed from scratch and, when
/// the three frame markers are present and usable, pushed to every
/// subscribed listener.
///
/// # Example
///
/// ```
/// use classroom_frame::ReferenceRegistry;
/// use classroom_types::ReferenceRole;
/// use glam::DVec3;
/// use std::sync::mpsc;
///
/// let mut registry = ReferenceRegistry::new();
/// let (tx, rx) = mpsc::channel();
/// registry.subscribe(move |frame| {
///     let _ = tx.send(*frame);
/// });
///
/// registry.assign_next(DVec3::new(0.0, 0.0, 0.0)).unwrap();
/// registry.assign_next(DVec3::new(1.0, 0.0, 0.0)).unwrap();
/// assert!(rx.try_recv().is_err());
///
/// let role = registry.assign_next(DVec3::new(0.5, 0.0, 1.0)).unwrap();
/// assert_eq!(role, Some(ReferenceRole::Wall2Point1));
/// let frame = rx.try_recv().unwrap();
/// assert!((frame.origin - DVec3::new(0.5, 0.0, 0.0)).length() < 1e-12);
/// ```
pub struct ReferenceRegistry {
    positions: HashMap<ReferenceRole, DVec3>,
    floor: Option<FloorPlane>,
    snap: SnapParams,
    min_floor_area: f64,
    listeners: Vec<FrameListener>,
}

impl Default for ReferenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ReferenceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceRegistry")
            .field("positions", &self.positions)
            .field("floor", &self.floor)
            .field("snap", &self.snap)
            .field("min_floor_area", &self.min_floor_area)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ReferenceRegistry {
    /// Creates an empty registry with default snapping.
    #[must_use]
    pub fn new() -> Self {
        Self {
            positions: HashMap::with_capacity(ReferenceRole::ALL.len()),
            floor: None,
            snap: SnapParams::default(),
            min_floor_area: DEFAULT_MIN_FLOOR_AREA,
            listeners: Vec::new(),
        }
    }

    /// Use custom floor snapping parameters.
    #[must_use]
    pub fn with_snap_params(mut self, snap: SnapParams) -> Self {
        self.snap = snap;
        self
    }

    /// Use a custom minimum floor area for [`ReferenceRegistry::offer_floor`].
    #[must_use]
    pub fn with_min_floor_area(mut self, area: f64) -> Self {
        self.min_floor_area = area;
        self
    }

    /// Registers a listener for freshly derived frames.
    pub fn subscribe(&mut self, listener: impl Fn(&RoomFrame) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Number of stored markers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if no marker is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns true once all five roles are filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.next_role().is_none()
    }

    /// Stored position for `role`.
    #[must_use]
    pub fn get(&self, role: ReferenceRole) -> Option<DVec3> {
        self.positions.get(&role).copied()
    }

    /// The role the next detected marker will be assigned to.
    #[must_use]
    pub fn next_role(&self) -> Option<ReferenceRole> {
        ReferenceRole::ALL
            .into_iter()
            .find(|role| !self.positions.contains_key(role))
    }

    /// The current floor plane, if one has been accepted.
    #[must_use]
    pub const fn floor(&self) -> Option<&FloorPlane> {
        self.floor.as_ref()
    }

    /// Stores a newly detected marker under the first unfilled role.
    ///
    /// Returns the role it was assigned, or `None` when every role is
    /// already filled (the marker is ignored).
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Sample`] if the position is not finite.
    pub fn assign_next(&mut self, position: DVec3) -> Result<Option<ReferenceRole>> {
        let Some(role) = self.next_role() else {
            trace!("all reference roles filled; ignoring marker");
            return Ok(None);
        };
        let sample = ReferenceSample::from_point(role, position)?;
        self.insert(sample);
        Ok(Some(role))
    }

    /// Stores a marker under its own role, replacing any previous position.
    ///
    /// Returns the recomputed frame when one is available.
    pub fn insert(&mut self, sample: ReferenceSample) -> Option<RoomFrame> {
        let position = self.settle(sample.point());
        debug!(role = %sample.role, x = position.x, y = position.y, z = position.z, "reference stored");
        self.positions.insert(sample.role, position);
        self.refresh()
    }

    /// Removes a marker.
    pub fn remove(&mut self, role: ReferenceRole) -> Option<DVec3> {
        let removed = self.positions.remove(&role);
        if removed.is_some() {
            self.refresh();
        }
        removed
    }

    /// Accepts `plane` as the floor if none is set and it is large enough.
    ///
    /// Returns true when the plane was accepted.
    pub fn offer_floor(&mut self, plane: FloorPlane) -> bool {
        if self.floor.is_some() || !plane.is_floor(self.min_floor_area) {
            return false;
        }
        debug!(area = plane.area(), height = plane.height(), "floor accepted");
        self.set_floor(plane);
        true
    }

    /// Sets or refines the floor and snaps every stored marker onto it.
    pub fn set_floor(&mut self, plane: FloorPlane) {
        self.floor = Some(plane);
        let snap = self.snap;
        for (role, position) in &mut self.positions {
            let settled = snap_to_floor(*position, &plane, &snap).resolve(*position);
            if settled != *position {
                trace!(role = %role, from = position.y, to = settled.y, "reference snapped to floor");
            }
            *position = settled;
        }
        self.refresh();
    }

    /// Forgets every marker and the floor. Listeners stay subscribed.
    pub fn reset(&mut self) {
        debug!(markers = self.positions.len(), "registry reset");
        self.positions.clear();
        self.floor = None;
    }

    /// Derives the room frame from the stored wall 1 and wall 2 markers.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::MissingReferencePoint`] naming the first absent
    /// frame marker, or [`FrameError::DegenerateGeometry`] from
    /// [`derive_frame`].
    pub fn frame(&self) -> Result<RoomFrame> {
        let [p1, p2, p3] = ReferenceRole::FRAME_ROLES.map(|role| {
            self.get(role)
                .ok_or(FrameError::MissingReferencePoint(role))
        });
        derive_frame(p1?, p2?, p3?)
    }

    /// Position of a stored marker in room coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::MissingReferencePoint`] if `role` is not
    /// stored, or any error from [`ReferenceRegistry::frame`].
    pub fn locate(&self, role: ReferenceRole) -> Result<DVec3> {
        let position = self
            .get(role)
            .ok_or(FrameError::MissingReferencePoint(role))?;
        Ok(self.frame()?.to_room(position))
    }

    /// Every stored marker in room coordinates, ordered by role.
    ///
    /// # Errors
    ///
    /// Any error from [`ReferenceRegistry::frame`].
    pub fn room_positions(&self) -> Result<Vec<(ReferenceRole, DVec3)>> {
        let frame = self.frame()?;
        Ok(ReferenceRole::ALL
            .into_iter()
            .filter_map(|role| self.get(role).map(|p| (role, frame.to_room(p))))
            .collect())
    }

    fn settle(&self, position: DVec3) -> DVec3 {
        self.floor.as_ref().map_or(position, |floor| {
            snap_to_floor(position, floor, &self.snap).resolve(position)
        })
    }

    fn refresh(&self) -> Option<RoomFrame> {
        match self.frame() {
            Ok(frame) => {
                debug!(
                    x = frame.origin.x,
                    y = frame.origin.y,
                    z = frame.origin.z,
                    yaw = frame.yaw,
                    "room frame derived"
                );
                for listener in &self.listeners {
                    listener(&frame);
                }
                Some(frame)
            }
            Err(FrameError::MissingReferencePoint(role)) => {
                trace!(missing = %role, "room frame deferred");
                None
            }
            Err(err) => {
                warn!(error = %err, "room frame unavailable");
                None
            }
        }
    }
}
