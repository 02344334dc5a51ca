//! Testimonial carousel.
//!
//! The controller owns its autoplay timer: every start first drops the
//! previous handle, so at most one timer is ever alive. Pointer hover is the
//! only thing that pauses it. Picking an indicator while hovered moves the
//! slide but leaves the timer stopped.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Interval;
use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use crate::config::LandingConfig;
use crate::dom;

/// Something that can call `tick` every `period_ms` until its handle drops.
pub trait Ticker {
    type Handle;

    fn every(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> Self::Handle;
}

/// Browser timers.
pub struct GlooTicker;

impl Ticker for GlooTicker {
    type Handle = Interval;

    fn every(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> Interval {
        Interval::new(period_ms, tick)
    }
}

/// Where the current slide gets drawn.
pub trait SlideView {
    fn render(&self, offset_percent: f64, active: usize);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselState {
    index: usize,
    count: usize,
}

impl CarouselState {
    /// `None` for an empty carousel.
    pub fn new(count: usize) -> Option<Self> {
        (count > 0).then_some(Self { index: 0, count })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn go_to(&mut self, index: usize) {
        self.index = index % self.count;
    }

    pub fn advance(&mut self) {
        self.go_to(self.index + 1);
    }

    /// Track translation in percent of its own width.
    pub fn offset_percent(&self) -> f64 {
        if self.index == 0 {
            return 0.0;
        }
        -(self.index as f64 * (100.0 / self.count as f64))
    }
}

struct Inner<V, T: Ticker> {
    state: CarouselState,
    paused: bool,
    period_ms: u32,
    view: V,
    ticker: T,
    timer: Option<T::Handle>,
}

pub struct Carousel<V, T: Ticker> {
    inner: Rc<RefCell<Inner<V, T>>>,
}

impl<V, T: Ticker> Clone for Carousel<V, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<V, T> Carousel<V, T>
where
    V: SlideView + 'static,
    T: Ticker + 'static,
{
    /// Builds the carousel on slide 0 without starting autoplay.
    pub fn new(state: CarouselState, view: V, ticker: T, period_ms: u32) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                state,
                paused: false,
                period_ms,
                view,
                ticker,
                timer: None,
            })),
        }
    }

    pub fn go_to_slide(&self, index: usize) {
        let mut inner = self.inner.borrow_mut();
        inner.state.go_to(index);
        let (offset, active) = (inner.state.offset_percent(), inner.state.index());
        inner.view.render(offset, active);
    }

    pub fn next_slide(&self) {
        let next = {
            let inner = self.inner.borrow();
            (inner.state.index() + 1) % inner.state.count()
        };
        self.go_to_slide(next);
    }

    pub fn start_autoplay(&self) {
        self.stop_autoplay();

        let weak: Weak<RefCell<Inner<V, T>>> = Rc::downgrade(&self.inner);
        let tick = Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                Carousel { inner }.next_slide();
            }
        });

        let mut inner = self.inner.borrow_mut();
        let handle = inner.ticker.every(inner.period_ms, tick);
        inner.timer = Some(handle);
    }

    pub fn stop_autoplay(&self) {
        let previous = self.inner.borrow_mut().timer.take();
        drop(previous);
    }

    pub fn pointer_enter(&self) {
        self.inner.borrow_mut().paused = true;
        self.stop_autoplay();
    }

    pub fn pointer_leave(&self) {
        self.inner.borrow_mut().paused = false;
        self.start_autoplay();
    }

    /// Manual navigation. Resets the idle interval unless hovered.
    pub fn select_indicator(&self, index: usize) {
        self.go_to_slide(index);
        if !self.is_paused() {
            self.stop_autoplay();
            self.start_autoplay();
        }
    }

    pub fn current_index(&self) -> usize {
        self.inner.borrow().state.index()
    }

    pub fn offset_percent(&self) -> f64 {
        self.inner.borrow().state.offset_percent()
    }

    pub fn is_paused(&self) -> bool {
        self.inner.borrow().paused
    }

    pub fn is_autoplaying(&self) -> bool {
        self.inner.borrow().timer.is_some()
    }
}

/// Slide track plus indicator dots in the page.
pub struct DomSlides {
    track: HtmlElement,
    dots: Vec<Element>,
    active_class: &'static str,
}

impl SlideView for DomSlides {
    fn render(&self, offset_percent: f64, active: usize) {
        let _ = self
            .track
            .style()
            .set_property("transform", &format!("translateX({}%)", offset_percent));
        for (i, dot) in self.dots.iter().enumerate() {
            let _ = dot.class_list().toggle_with_force(self.active_class, i == active);
        }
    }
}

pub type PageCarousel = Carousel<DomSlides, GlooTicker>;

pub fn setup(document: &Document, config: &LandingConfig) -> Result<Option<PageCarousel>, JsValue> {
    let (Some(container), Some(track)) = (
        document.get_element_by_id(config.carousel_id),
        document.get_element_by_id(config.carousel_track_id),
    ) else {
        debug!("No testimonial carousel on this page");
        return Ok(None);
    };
    let Some(state) = CarouselState::new(config.carousel_slides) else {
        return Ok(None);
    };

    let dots = dom::query_all(document, config.carousel_dot_selector)?;
    let view = DomSlides {
        track: track.dyn_into()?,
        dots: dots.clone(),
        active_class: config.carousel_active_class,
    };
    let carousel = Carousel::new(state, view, GlooTicker, config.carousel_interval_ms);

    {
        let carousel = carousel.clone();
        dom::listen(&container, "mouseenter", move |_| carousel.pointer_enter())?;
    }
    {
        let carousel = carousel.clone();
        dom::listen(&container, "mouseleave", move |_| carousel.pointer_leave())?;
    }
    for (index, dot) in dots.iter().enumerate() {
        let carousel = carousel.clone();
        dom::listen(dot, "click", move |_| carousel.select_indicator(index))?;
    }

    carousel.start_autoplay();
    debug!("Carousel running with {} slides", config.carousel_slides);
    Ok(Some(carousel))
}
