//! Current picker value and change notification.

use crate::config::PickerConfig;
use crate::error::{StoreError, StoreResult};
use crate::listener::{Changes, Interest, ListenerBundle, ListenerId};
use crate::support::SupportProvider;
use oklch_color::{
    code_to_lch_value, format_output, get_visible_value, to_fragment, OutputFormat, Rounding, VisibleValue,
};
use oklch_core::{Axis, LchValue, OklchColor, PartialValue, PickerId, Support};
use tracing::{debug, trace};

/// Registration name of the chart listener for `axis`.
///
/// [`ValueStore::initial_draw`] looks the three chart listeners up by these
/// names.
pub fn chart_listener_name(axis: Axis) -> String {
    format!("chart-for-{axis}")
}

struct Registered {
    id: ListenerId,
    name: String,
    bundle: ListenerBundle,
}

/// State of one picker session.
///
/// Values pass a significant-change filter before they are stored: a new
/// value that equals the current one after [`Rounding::Aggressive`] is
/// dropped. Accepted values are stored at [`Rounding::Precise`] and every
/// listener whose interest changed is called, in registration order.
pub struct ValueStore {
    id: PickerId,
    value: LchValue,
    color_code_input: String,
    output_format: OutputFormat,
    show_charts: bool,
    show_p3: bool,
    show_rec2020: bool,
    support: Support,
    provider: Box<dyn SupportProvider>,
    listeners: Vec<Registered>,
    next_listener: u64,
    initial_drawn: bool,
}

impl ValueStore {
    /// Creates a store starting at `default_code` with default settings.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidDefaultColor`] if the code does not parse.
    pub fn new(default_code: &str, provider: impl SupportProvider + 'static) -> StoreResult<Self> {
        let config = PickerConfig {
            default_color: default_code.to_owned(),
            ..PickerConfig::default()
        };
        Self::from_config(&config, provider)
    }

    /// Creates a store from a configuration.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidDefaultColor`] if the default color does not
    /// parse.
    pub fn from_config(config: &PickerConfig, provider: impl SupportProvider + 'static) -> StoreResult<Self> {
        let value = code_to_lch_value(&config.default_color)
            .ok_or_else(|| StoreError::invalid_default_color(&config.default_color))?;
        let support = provider.query();
        let id = PickerId::random();
        debug!(picker = %id, ?value, ?support, "store created");
        Ok(Self {
            id,
            value,
            color_code_input: config.default_color.clone(),
            output_format: config.output_format,
            show_charts: config.show_charts,
            show_p3: config.show_p3,
            show_rec2020: config.show_rec2020,
            support,
            provider: Box::new(provider),
            listeners: Vec::new(),
            next_listener: 0,
            initial_drawn: false,
        })
    }

    /// Session id, used to key this picker's chart tasks.
    #[inline]
    pub fn id(&self) -> &PickerId {
        &self.id
    }

    /// Current value.
    #[inline]
    pub fn value(&self) -> LchValue {
        self.value
    }

    /// Current value as a color.
    #[inline]
    pub fn color(&self) -> OklchColor {
        self.value.to_color()
    }

    // ========================================================================
    // Updates
    // ========================================================================

    /// Stores `next` if it differs significantly from the current value.
    ///
    /// Hue is wrapped and chroma and alpha are clamped before anything else,
    /// so the stored value is always a valid OKLCH color.
    ///
    /// Returns the changed components, or `None` if the update was
    /// dropped.
    pub fn set_value(&mut self, next: LchValue) -> Option<Changes> {
        let prev = self.value;
        let next = next.normalized();
        if Rounding::Aggressive.value(&prev) == Rounding::Aggressive.value(&next) {
            trace!(?next, "insignificant change dropped");
            return None;
        }

        // Rounding can land a hue on 360
        let next = Rounding::Precise.value(&next).normalized();
        let changes = Changes::between(&prev, &next);
        self.value = next;
        if changes.any() {
            trace!(?next, charts = changes.charts_to_change(), "value changed");
            for reg in &mut self.listeners {
                reg.bundle.dispatch(&changes, &next);
            }
        }
        Some(changes)
    }

    /// Merges `parts` into the current value and stores the result.
    pub fn set_components(&mut self, parts: PartialValue) -> Option<Changes> {
        let merged = self.value.merge(&Rounding::Precise.partial(&parts));
        self.set_value(merged)
    }

    /// Parses `code` and stores it. Leaves everything unchanged and returns
    /// `false` if it does not parse.
    pub fn set_color_code_input(&mut self, code: &str) -> bool {
        match code_to_lch_value(code) {
            Some(value) => {
                self.set_value(value);
                self.color_code_input = code.to_owned();
                true
            }
            None => {
                debug!(code, "color code rejected");
                false
            }
        }
    }

    /// Last accepted color code.
    #[inline]
    pub fn color_code_input(&self) -> &str {
        &self.color_code_input
    }

    // ========================================================================
    // Listeners
    // ========================================================================

    /// Registers a bundle under `name`, replacing any bundle of that name.
    ///
    /// A replaced bundle keeps its id and position.
    pub fn add_paint_callbacks(&mut self, name: &str, bundle: ListenerBundle) -> ListenerId {
        if let Some(reg) = self.listeners.iter_mut().find(|r| r.name == name) {
            reg.bundle = bundle;
            return reg.id;
        }
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(Registered {
            id,
            name: name.to_owned(),
            bundle,
        });
        id
    }

    /// Id of the bundle registered under `name`.
    pub fn listener_id(&self, name: &str) -> Option<ListenerId> {
        self.listeners.iter().find(|r| r.name == name).map(|r| r.id)
    }

    /// Runs every callback of every bundle with `value`, changed or not.
    ///
    /// Component callbacks get 3 charts to change, alpha gets 0.
    pub fn paint(&mut self, value: &LchValue) {
        for reg in &mut self.listeners {
            for interest in Interest::ALL {
                reg.bundle.fire(interest, value, 3);
            }
        }
    }

    /// Runs one callback of one bundle with the current value.
    ///
    /// Returns `false` if the bundle has no callback for `interest`.
    pub fn paint_one(&mut self, id: ListenerId, interest: Interest) -> bool {
        let value = self.value;
        self.listeners
            .iter_mut()
            .find(|r| r.id == id)
            .is_some_and(|r| r.bundle.fire(interest, &value, 3))
    }

    /// Draws the three charts once they are all registered.
    ///
    /// Fires the hue, lightness and chroma chart callbacks in that order,
    /// each with one chart to change. Returns `true` the one time it draws.
    pub fn initial_draw(&mut self) -> bool {
        if self.initial_drawn {
            return false;
        }
        let order = [Axis::H, Axis::L, Axis::C];
        let ready = order.iter().all(|&axis| {
            let name = chart_listener_name(axis);
            self.listeners
                .iter()
                .any(|r| r.name == name && r.bundle.has(Interest::axis(axis)))
        });
        if !ready {
            return false;
        }

        self.initial_drawn = true;
        let value = self.value;
        for axis in order {
            let name = chart_listener_name(axis);
            if let Some(reg) = self.listeners.iter_mut().find(|r| r.name == name) {
                reg.bundle.fire(Interest::axis(axis), &value, 1);
            }
        }
        debug!(picker = %self.id, "initial draw");
        true
    }

    // ========================================================================
    // Settings
    // ========================================================================

    /// Output notation.
    #[inline]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    /// Sets the output notation.
    #[inline]
    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.output_format = format;
    }

    /// Current value in the output notation.
    pub fn formatted_output(&self) -> String {
        format_output(&self.value, self.output_format)
    }

    /// Whether charts are shown.
    #[inline]
    pub fn show_charts(&self) -> bool {
        self.show_charts
    }

    /// Shows or hides the charts.
    #[inline]
    pub fn set_show_charts(&mut self, show: bool) {
        self.show_charts = show;
    }

    /// Whether the P3 gamut is shown.
    #[inline]
    pub fn show_p3(&self) -> bool {
        self.show_p3
    }

    /// Shows or hides the P3 gamut.
    #[inline]
    pub fn set_show_p3(&mut self, show: bool) {
        self.show_p3 = show;
    }

    /// Whether the Rec2020 gamut is shown.
    #[inline]
    pub fn show_rec2020(&self) -> bool {
        self.show_rec2020
    }

    /// Shows or hides the Rec2020 gamut.
    #[inline]
    pub fn set_show_rec2020(&mut self, show: bool) {
        self.show_rec2020 = show;
    }

    /// Display capabilities from the last query.
    #[inline]
    pub fn support(&self) -> Support {
        self.support
    }

    /// Queries the provider again. Returns `true` if the answer changed.
    pub fn refresh_support(&mut self) -> bool {
        let support = self.provider.query();
        if support == self.support {
            return false;
        }
        debug!(?support, "display support changed");
        self.support = support;
        true
    }

    /// How the current value can be shown under the show flags.
    pub fn visible_value(&self) -> VisibleValue {
        get_visible_value(&self.value, self.show_p3, self.show_rec2020)
    }

    /// Current value as a `#l,c,h,a` link fragment.
    pub fn fragment(&self) -> String {
        to_fragment(&self.value)
    }
}

impl std::fmt::Debug for ValueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueStore")
            .field("id", &self.id)
            .field("value", &self.value)
            .field("output_format", &self.output_format)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::StaticSupport;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn store() -> ValueStore {
        ValueStore::new("oklch(0.7 0.1 200)", StaticSupport::NONE).unwrap()
    }

    type Log = Rc<RefCell<Vec<String>>>;

    fn logging_bundle(log: &Log) -> ListenerBundle {
        let mut bundle = ListenerBundle::new();
        for axis in [Axis::L, Axis::C, Axis::H] {
            let log = Rc::clone(log);
            bundle = bundle.on_axis(axis, move |v, n| log.borrow_mut().push(format!("{axis} {v} {n}")));
        }
        let alpha_log = Rc::clone(log);
        let lch_log = Rc::clone(log);
        bundle
            .on_alpha(move |v, n| alpha_log.borrow_mut().push(format!("a {v} {n}")))
            .on_lch(move |_| lch_log.borrow_mut().push("lch".into()))
    }

    #[test]
    fn test_initial_state() {
        let store = store();
        assert_eq!(store.value(), LchValue::new(0.7, 0.1, 200.0, 1.0));
        assert_eq!(store.color_code_input(), "oklch(0.7 0.1 200)");
        assert!(store.show_p3() && !store.show_rec2020() && store.show_charts());
        assert_eq!(store.support(), Support::new(false, false));
        assert_eq!(store.id().as_str().len(), 7);
        assert_eq!(store.output_format(), OutputFormat::Lch);
    }

    #[test]
    fn test_invalid_default() {
        let err = ValueStore::new("not a color", StaticSupport::NONE).unwrap_err();
        assert!(matches!(err, StoreError::InvalidDefaultColor(code) if code == "not a color"));
    }

    #[test]
    fn test_insignificant_change_dropped() {
        let mut store = store();
        let log = Log::default();
        store.add_paint_callbacks("all", logging_bundle(&log));
        assert!(store.set_components(PartialValue::axis(Axis::L, 0.700_01)).is_none());
        assert_eq!(store.value().l, 0.7);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_precise_rounding_stored() {
        let mut store = store();
        store.set_components(PartialValue::axis(Axis::C, 0.123_456_789));
        assert_eq!(store.value().c, 0.123457);
        store.set_components(PartialValue::axis(Axis::H, 123.456_789));
        assert_eq!(store.value().h, 123.4568);
    }

    #[test]
    fn test_out_of_range_components_normalized() {
        let mut store = store();
        store.set_components(PartialValue::axis(Axis::H, 370.0));
        assert_eq!(store.value().h, 10.0);
        assert_eq!(store.fragment(), "#0.7,0.1,10,1");

        store.set_components(PartialValue::axis(Axis::H, -10.0));
        assert_eq!(store.value().h, 350.0);
        store.set_components(PartialValue::axis(Axis::H, 359.999_99));
        assert_eq!(store.value().h, 0.0);

        store.set_components(PartialValue::axis(Axis::C, -0.2));
        assert_eq!(store.value().c, 0.0);
        store.set_components(PartialValue::alpha(1.5));
        assert_eq!(store.value().a, 1.0);

        // 360 and 0 are the same hue
        store.set_components(PartialValue::axis(Axis::H, 360.0));
        assert_eq!(store.value().h, 0.0);
    }

    #[test]
    fn test_listener_dispatch() {
        let mut store = store();
        let log = Log::default();
        store.add_paint_callbacks("all", logging_bundle(&log));

        let changes = store
            .set_components(PartialValue::axis(Axis::L, 0.5).and(Axis::H, 100.0))
            .unwrap();
        assert_eq!(changes.charts_to_change(), 2);
        assert_eq!(*log.borrow(), ["l 0.5 2", "h 100 2", "lch"]);

        log.borrow_mut().clear();
        store.set_components(PartialValue::alpha(0.5));
        assert_eq!(*log.borrow(), ["a 0.5 0", "lch"]);
    }

    #[test]
    fn test_color_code_input() {
        let mut store = store();
        assert!(!store.set_color_code_input("nope"));
        assert_eq!(store.color_code_input(), "oklch(0.7 0.1 200)");

        assert!(store.set_color_code_input("color(srgb 1 1 1)"));
        assert_eq!(store.value(), LchValue::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(store.color_code_input(), "color(srgb 1 1 1)");

        assert!(store.set_color_code_input("rgb(1 1 1)"));
        assert_eq!(store.value(), LchValue::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(store.color_code_input(), "rgb(1 1 1)");

        assert!(store.set_color_code_input("rgb(1, 1, 1)"));
        assert!(store.value().l < 0.1);
    }

    #[test]
    fn test_replace_keeps_id() {
        let mut store = store();
        let first = store.add_paint_callbacks("x", ListenerBundle::new());
        let other = store.add_paint_callbacks("y", ListenerBundle::new());
        let again = store.add_paint_callbacks("x", ListenerBundle::new().on_lch(|_| {}));
        assert_eq!(first, again);
        assert_ne!(first, other);
        assert_eq!(store.listener_id("y"), Some(other));
        assert!(store.paint_one(first, Interest::Lch));
        assert!(!store.paint_one(first, Interest::L));
    }

    #[test]
    fn test_paint_forces_everything() {
        let mut store = store();
        let log = Log::default();
        store.add_paint_callbacks("all", logging_bundle(&log));
        let value = store.value();
        store.paint(&value);
        assert_eq!(*log.borrow(), ["l 0.7 3", "c 0.1 3", "h 200 3", "a 1 0", "lch"]);
    }

    #[test]
    fn test_initial_draw_once() {
        let mut store = store();
        let log = Log::default();
        for axis in [Axis::L, Axis::C] {
            let log = Rc::clone(&log);
            store.add_paint_callbacks(
                &chart_listener_name(axis),
                ListenerBundle::new().on_axis(axis, move |v, n| log.borrow_mut().push(format!("{axis} {v} {n}"))),
            );
        }
        assert!(!store.initial_draw());

        let h_log = Rc::clone(&log);
        store.add_paint_callbacks(
            &chart_listener_name(Axis::H),
            ListenerBundle::new().on_h(move |v, n| h_log.borrow_mut().push(format!("h {v} {n}"))),
        );
        assert!(store.initial_draw());
        assert_eq!(*log.borrow(), ["h 200 1", "l 0.7 1", "c 0.1 1"]);
        assert!(!store.initial_draw());
    }

    #[test]
    fn test_refresh_support() {
        struct Flip(Rc<Cell<bool>>);
        impl SupportProvider for Flip {
            fn query(&self) -> Support {
                Support::new(self.0.get(), false)
            }
        }

        let p3 = Rc::new(Cell::new(false));
        let mut store = ValueStore::new("#ff0000", Flip(Rc::clone(&p3))).unwrap();
        assert!(!store.refresh_support());
        p3.set(true);
        assert!(store.refresh_support());
        assert!(store.support().p3);
    }

    #[test]
    fn test_outputs() {
        let mut store = store();
        store.set_output_format(OutputFormat::Hex);
        assert!(store.formatted_output().starts_with('#'));
        assert!(store.fragment().starts_with("#0.7,0.1,200"));
        assert!(store.visible_value().is_exact());
    }
}
