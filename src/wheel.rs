use tracing::debug;

/// Spacing between adjacent wheel items in position units.
pub const ITEM_HEIGHT: f64 = 40.0;

const SETTLE_EPSILON: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelMotion {
    Instant,
    /// Exponential approach toward the snapped position; `rate` is per second.
    Eased { rate: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleItem<'a> {
    pub index: usize,
    pub label: &'a str,
    pub distance: f64,
}

#[derive(Debug, Clone, Copy)]
struct Settle {
    target: f64,
}

/// Bounded discrete selector driven by drag and scroll input.
///
/// Transitions return the newly selected label when a gesture settles, which
/// is the only notification a wheel produces. Drags commit on release and may
/// glide to their target; discrete scroll ticks snap immediately.
#[derive(Debug, Clone)]
pub struct ValueWheel {
    items: Vec<String>,
    selected_index: usize,
    position: f64,
    item_height: f64,
    motion: WheelMotion,
    drag_active: bool,
    settle: Option<Settle>,
}

impl ValueWheel {
    pub fn new(
        items: Vec<String>,
        initial: &str,
        item_height: f64,
        motion: WheelMotion,
    ) -> Option<Self> {
        if items.is_empty() {
            return None;
        }

        let selected_index = items.iter().position(|item| item == initial).unwrap_or(0);
        let item_height = if item_height.is_finite() && item_height > 0.0 {
            item_height
        } else {
            ITEM_HEIGHT
        };

        Some(Self {
            items,
            selected_index,
            position: -(selected_index as f64) * item_height,
            item_height,
            motion,
            drag_active: false,
            settle: None,
        })
    }

    /// Wheel over zero-padded numbers `00..count`.
    pub fn numeric(count: usize, initial: usize, item_height: f64, motion: WheelMotion) -> Self {
        let count = count.max(1);
        let items = (0..count).map(|value| format!("{value:02}")).collect::<Vec<_>>();
        let initial = format!("{:02}", initial.min(count - 1));
        Self::new(items, &initial, item_height, motion).expect("numeric wheel has at least one item")
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected(&self) -> &str {
        &self.items[self.selected_index]
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn item_height(&self) -> f64 {
        self.item_height
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_active
    }

    pub fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    pub fn set_value(&mut self, item: &str) {
        let Some(index) = self.items.iter().position(|candidate| candidate == item) else {
            return;
        };

        self.settle = None;
        self.drag_active = false;
        self.selected_index = index;
        self.position = self.rest_position(index);
    }

    pub fn begin_drag(&mut self) {
        if self.is_inert() {
            return;
        }

        if self.settle.take().is_some() {
            debug!(position = self.position, "settle cancelled by new drag");
        }
        self.drag_active = true;
    }

    pub fn update_drag(&mut self, delta: f64) {
        if !self.drag_active || !delta.is_finite() {
            return;
        }

        // One item of overscroll past either end; release snaps back inside.
        let (lower, upper) = self.bounds();
        self.position = (self.position + delta).clamp(lower - self.item_height, upper + self.item_height);
    }

    pub fn end_drag(&mut self) -> Option<String> {
        if !self.drag_active {
            return None;
        }
        self.drag_active = false;

        let index = self.closest_index();
        self.selected_index = index;
        let target = self.rest_position(index);

        match self.motion {
            WheelMotion::Eased { rate } if rate > 0.0 && (self.position - target).abs() > SETTLE_EPSILON => {
                self.settle = Some(Settle { target });
                None
            }
            _ => {
                self.position = target;
                Some(self.notify())
            }
        }
    }

    /// Advances a pending settle by `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> Option<String> {
        let settle = self.settle?;
        let rate = match self.motion {
            WheelMotion::Eased { rate } => rate,
            WheelMotion::Instant => f64::INFINITY,
        };

        let remaining = settle.target - self.position;
        let fraction = if dt.is_finite() && dt > 0.0 {
            1.0 - (-rate * dt).exp()
        } else {
            0.0
        };
        self.position += remaining * fraction;

        if (settle.target - self.position).abs() > SETTLE_EPSILON {
            return None;
        }

        self.position = settle.target;
        self.settle = None;
        Some(self.notify())
    }

    /// Jumps a pending settle to its target and delivers its notification.
    pub fn finish_settle(&mut self) -> Option<String> {
        let settle = self.settle.take()?;
        self.position = settle.target;
        Some(self.notify())
    }

    pub fn apply_discrete_scroll(&mut self, delta: f64) -> Option<String> {
        if self.is_inert() || self.drag_active || !delta.is_finite() {
            return None;
        }

        self.settle = None;
        let (lower, upper) = self.bounds();
        self.position = (self.position + delta).clamp(lower, upper);

        let index = self.closest_index();
        self.selected_index = index;
        self.position = self.rest_position(index);
        Some(self.notify())
    }

    /// Items within `radius` of the current position with their distance from
    /// the selection line, measured in items.
    pub fn visible(&self, radius: usize) -> Vec<VisibleItem<'_>> {
        let center = (-self.position / self.item_height).round();
        let center = if center <= 0.0 { 0 } else { center as usize };
        let first = center.saturating_sub(radius);
        let last = center.saturating_add(radius).min(self.items.len() - 1);

        (first..=last)
            .map(|index| VisibleItem {
                index,
                label: &self.items[index],
                distance: (self.position + index as f64 * self.item_height).abs() / self.item_height,
            })
            .collect()
    }

    fn is_inert(&self) -> bool {
        self.items.len() < 2
    }

    fn bounds(&self) -> (f64, f64) {
        (-((self.items.len() - 1) as f64) * self.item_height, 0.0)
    }

    fn rest_position(&self, index: usize) -> f64 {
        -(index as f64) * self.item_height
    }

    fn closest_index(&self) -> usize {
        let raw = (-self.position / self.item_height).round();
        if raw <= 0.0 {
            0
        } else {
            (raw as usize).min(self.items.len() - 1)
        }
    }

    fn notify(&self) -> String {
        let label = self.selected().to_string();
        debug!(index = self.selected_index, label = %label, "wheel settled");
        label
    }
}
