//! Typed listener bundles.
//!
//! A bundle holds at most one callback per [`Interest`]. Component
//! callbacks get the new component and the number of charts being
//! repainted; the others get the whole value.
//!
//! | Interest | Fires when | Receives |
//! |----------|------------|----------|
//! | `L`, `C`, `H` | that axis changed | component, charts to change |
//! | `Alpha` | alpha changed | alpha, 0 |
//! | `Lc`, `Ch`, `Lh` | either axis changed | value |
//! | `Lch` | anything changed | value |

use oklch_core::{Axis, LchValue};
use std::fmt;

/// Callback for one component: `(value, charts_to_change)`.
pub type ComponentCallback = Box<dyn FnMut(f64, usize)>;

/// Callback for a whole value.
pub type ValueCallback = Box<dyn FnMut(&LchValue)>;

/// What a callback listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interest {
    /// Lightness
    L,
    /// Chroma
    C,
    /// Hue
    H,
    /// Alpha
    Alpha,
    /// Lightness or chroma
    Lc,
    /// Chroma or hue
    Ch,
    /// Lightness or hue
    Lh,
    /// Any component
    Lch,
}

impl Interest {
    /// Every interest in dispatch order.
    pub const ALL: [Interest; 8] = [
        Interest::L,
        Interest::C,
        Interest::H,
        Interest::Alpha,
        Interest::Lc,
        Interest::Ch,
        Interest::Lh,
        Interest::Lch,
    ];

    /// Component interest of an axis.
    #[inline]
    pub fn axis(axis: Axis) -> Self {
        match axis {
            Axis::L => Interest::L,
            Axis::C => Interest::C,
            Axis::H => Interest::H,
        }
    }

    /// Pair interest repainting the slider of `axis`: the two other axes.
    #[inline]
    pub fn slider(axis: Axis) -> Self {
        match axis {
            Axis::L => Interest::Ch,
            Axis::C => Interest::Lh,
            Axis::H => Interest::Lc,
        }
    }

    /// Returns `true` if a change set triggers this interest.
    pub fn fires(self, changes: &Changes) -> bool {
        match self {
            Interest::L => changes.l,
            Interest::C => changes.c,
            Interest::H => changes.h,
            Interest::Alpha => changes.a,
            Interest::Lc => changes.l || changes.c,
            Interest::Ch => changes.c || changes.h,
            Interest::Lh => changes.l || changes.h,
            Interest::Lch => changes.any(),
        }
    }
}

/// Which components differ between two stored values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Changes {
    /// Lightness changed
    pub l: bool,
    /// Chroma changed
    pub c: bool,
    /// Hue changed
    pub h: bool,
    /// Alpha changed
    pub a: bool,
}

impl Changes {
    /// Every component marked changed.
    pub const ALL: Changes = Changes {
        l: true,
        c: true,
        h: true,
        a: true,
    };

    /// Exact comparison of two values.
    pub fn between(prev: &LchValue, next: &LchValue) -> Self {
        Self {
            l: prev.l != next.l,
            c: prev.c != next.c,
            h: prev.h != next.h,
            a: prev.a != next.a,
        }
    }

    /// Number of charts to repaint: how many of L, C and H changed.
    pub fn charts_to_change(&self) -> usize {
        [self.l, self.c, self.h].into_iter().filter(|&b| b).count()
    }

    /// Returns `true` if any component changed.
    #[inline]
    pub fn any(&self) -> bool {
        self.l || self.c || self.h || self.a
    }
}

/// Opaque handle of a registered bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

/// Callbacks of one consumer, at most one per interest.
#[derive(Default)]
pub struct ListenerBundle {
    l: Option<ComponentCallback>,
    c: Option<ComponentCallback>,
    h: Option<ComponentCallback>,
    alpha: Option<ComponentCallback>,
    lc: Option<ValueCallback>,
    ch: Option<ValueCallback>,
    lh: Option<ValueCallback>,
    lch: Option<ValueCallback>,
}

impl ListenerBundle {
    /// Empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Listens to one axis.
    pub fn on_axis(mut self, axis: Axis, f: impl FnMut(f64, usize) + 'static) -> Self {
        let slot = match axis {
            Axis::L => &mut self.l,
            Axis::C => &mut self.c,
            Axis::H => &mut self.h,
        };
        *slot = Some(Box::new(f));
        self
    }

    /// Listens to lightness.
    pub fn on_l(self, f: impl FnMut(f64, usize) + 'static) -> Self {
        self.on_axis(Axis::L, f)
    }

    /// Listens to chroma.
    pub fn on_c(self, f: impl FnMut(f64, usize) + 'static) -> Self {
        self.on_axis(Axis::C, f)
    }

    /// Listens to hue.
    pub fn on_h(self, f: impl FnMut(f64, usize) + 'static) -> Self {
        self.on_axis(Axis::H, f)
    }

    /// Listens to alpha.
    pub fn on_alpha(mut self, f: impl FnMut(f64, usize) + 'static) -> Self {
        self.alpha = Some(Box::new(f));
        self
    }

    /// Listens to a value interest (`Lc`, `Ch`, `Lh` or `Lch`).
    ///
    /// Component interests are ignored here; use [`on_axis`](Self::on_axis)
    /// or [`on_alpha`](Self::on_alpha).
    pub fn on_value(mut self, interest: Interest, f: impl FnMut(&LchValue) + 'static) -> Self {
        let slot = match interest {
            Interest::Lc => &mut self.lc,
            Interest::Ch => &mut self.ch,
            Interest::Lh => &mut self.lh,
            Interest::Lch => &mut self.lch,
            Interest::L | Interest::C | Interest::H | Interest::Alpha => return self,
        };
        *slot = Some(Box::new(f));
        self
    }

    /// Listens to any change.
    pub fn on_lch(self, f: impl FnMut(&LchValue) + 'static) -> Self {
        self.on_value(Interest::Lch, f)
    }

    /// Returns `true` if a callback is set for `interest`.
    pub fn has(&self, interest: Interest) -> bool {
        match interest {
            Interest::L => self.l.is_some(),
            Interest::C => self.c.is_some(),
            Interest::H => self.h.is_some(),
            Interest::Alpha => self.alpha.is_some(),
            Interest::Lc => self.lc.is_some(),
            Interest::Ch => self.ch.is_some(),
            Interest::Lh => self.lh.is_some(),
            Interest::Lch => self.lch.is_some(),
        }
    }

    /// Interests with a callback, in dispatch order.
    pub fn interests(&self) -> Vec<Interest> {
        Interest::ALL.into_iter().filter(|&i| self.has(i)).collect()
    }

    /// Runs the callback for `interest`, if set.
    ///
    /// Component callbacks receive `charts`; alpha always receives 0.
    pub fn fire(&mut self, interest: Interest, value: &LchValue, charts: usize) -> bool {
        let component = |cb: &mut Option<ComponentCallback>, v: f64, n: usize| match cb {
            Some(f) => {
                f(v, n);
                true
            }
            None => false,
        };
        let whole = |cb: &mut Option<ValueCallback>| match cb {
            Some(f) => {
                f(value);
                true
            }
            None => false,
        };
        match interest {
            Interest::L => component(&mut self.l, value.l, charts),
            Interest::C => component(&mut self.c, value.c, charts),
            Interest::H => component(&mut self.h, value.h, charts),
            Interest::Alpha => component(&mut self.alpha, value.a, 0),
            Interest::Lc => whole(&mut self.lc),
            Interest::Ch => whole(&mut self.ch),
            Interest::Lh => whole(&mut self.lh),
            Interest::Lch => whole(&mut self.lch),
        }
    }

    /// Runs every callback whose interest `changes` triggers.
    pub fn dispatch(&mut self, changes: &Changes, value: &LchValue) {
        let charts = changes.charts_to_change();
        for interest in Interest::ALL {
            if interest.fires(changes) {
                self.fire(interest, value, charts);
            }
        }
    }
}

impl fmt::Debug for ListenerBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerBundle")
            .field("interests", &self.interests())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_charts_to_change() {
        let prev = LchValue::new(0.5, 0.1, 100.0, 1.0);
        let only_alpha = Changes::between(&prev, &LchValue { a: 0.5, ..prev });
        assert_eq!(only_alpha.charts_to_change(), 0);
        assert!(only_alpha.any());
        let two = Changes::between(&prev, &LchValue { l: 0.6, h: 120.0, ..prev });
        assert_eq!(two.charts_to_change(), 2);
        assert_eq!(Changes::ALL.charts_to_change(), 3);
    }

    #[test]
    fn test_pair_interests() {
        let only_c = Changes {
            c: true,
            ..Default::default()
        };
        assert!(Interest::Lc.fires(&only_c));
        assert!(Interest::Ch.fires(&only_c));
        assert!(!Interest::Lh.fires(&only_c));
        assert!(Interest::Lch.fires(&only_c));
        assert!(!Interest::Alpha.fires(&only_c));
        assert_eq!(Interest::slider(Axis::L), Interest::Ch);
    }

    #[test]
    fn test_dispatch_selectivity() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (l1, l2, l3) = (Rc::clone(&log), Rc::clone(&log), Rc::clone(&log));
        let mut bundle = ListenerBundle::new()
            .on_l(move |v, n| l1.borrow_mut().push(format!("l {v} {n}")))
            .on_alpha(move |v, n| l2.borrow_mut().push(format!("a {v} {n}")))
            .on_value(Interest::Lh, move |v| l3.borrow_mut().push(format!("lh {}", v.h)));
        assert_eq!(bundle.interests(), [Interest::L, Interest::Alpha, Interest::Lh]);

        let value = LchValue::new(0.5, 0.1, 100.0, 0.5);
        bundle.dispatch(
            &Changes {
                h: true,
                a: true,
                ..Default::default()
            },
            &value,
        );
        assert_eq!(*log.borrow(), ["a 0.5 0", "lh 100"]);
    }

    #[test]
    fn test_component_interest_ignored_by_on_value() {
        let bundle = ListenerBundle::new().on_value(Interest::L, |_| {});
        assert!(bundle.interests().is_empty());
    }
}
