//! Browser binding: mounts fragments over a DOM element and wires events.
//!
//! ```js
//! import init, { FragmentsFx } from "./fragmentfx.js";
//!
//! await init();
//! const fx = new FragmentsFx(document.querySelector(".hero"), {
//!   fragments: 30,
//!   parallax: true,
//!   randomParallax: { min: 20, max: 120 },
//! });
//! ```
//!
//! Layout starts once the element's background image has loaded. If the
//! image fails to load the widget stays empty.

mod dom;
mod image;
mod probe;

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{AnimationFrame, request_animation_frame};
use gloo::timers::callback::Timeout;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, MouseEvent, Window};

use crate::config::FragmentsConfig;
use crate::engine::{ContainerBounds, FragmentLayoutEngine};
use crate::error::FragmentsError;
use crate::geometry::{ClipSupport, ContainerSize, Point};
use crate::timing::{Debouncer, FrameCoalescer};

pub use dom::{FRAGMENT_CLASS, PIECE_CLASS};
pub use image::background_image_url;
pub use probe::probe_clip_support;

/// Install the panic hook and route `tracing` to the browser console.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    init_logging();
}

fn init_logging() {
    use tracing_subscriber::prelude::*;

    let console = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(tracing_web::MakeWebConsoleWriter::new());
    // Another module may already own the global subscriber.
    let _ = tracing_subscriber::registry().with(console).try_init();
}

/// Fragmented background image over one element.
#[wasm_bindgen]
pub struct FragmentsFx {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl FragmentsFx {
    /// Attach to `element`. `options` may be `undefined` for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(element: HtmlElement, options: JsValue) -> Result<FragmentsFx, JsValue> {
        let config = parse_options(&options)?;
        Ok(Self {
            shared: Shared::attach(element, config)?,
        })
    }

    /// Whether the image has loaded and fragments are on screen.
    #[wasm_bindgen(getter)]
    pub fn ready(&self) -> bool {
        self.shared.widget.borrow().is_some()
    }

    /// Whether the polygon clip path is in use (as opposed to `clip: rect()`).
    #[wasm_bindgen(getter, js_name = clipPathSupported)]
    pub fn clip_path_supported(&self) -> bool {
        self.shared.support == ClipSupport::Polygon
    }

    /// Unbind every listener and remove the fragment elements.
    pub fn destroy(&self) {
        self.shared.preload.borrow_mut().clear();
        if let Some(widget) = self.shared.widget.borrow_mut().take() {
            widget.teardown();
        }
    }
}

fn parse_options(options: &JsValue) -> Result<FragmentsConfig, FragmentsError> {
    if options.is_undefined() || options.is_null() {
        return Ok(FragmentsConfig::default());
    }
    let json: String = js_sys::JSON::stringify(options)?.into();
    FragmentsConfig::from_json(&json)
}

/// State shared between the JS handle and the image load callbacks.
struct Shared {
    host: HtmlElement,
    config: FragmentsConfig,
    support: ClipSupport,
    image_src: String,
    preload: RefCell<Vec<EventListener>>,
    widget: RefCell<Option<Rc<Widget>>>,
}

impl Shared {
    fn attach(host: HtmlElement, config: FragmentsConfig) -> Result<Rc<Self>, FragmentsError> {
        let window = web_sys::window().ok_or(FragmentsError::NoWindow)?;
        let document = window.document().ok_or(FragmentsError::NoDocument)?;
        let support = probe_clip_support(&document);
        let image_src = image::host_image_src(&window, &host)?;

        let shared = Rc::new(Self {
            host,
            config,
            support,
            image_src,
            preload: RefCell::new(Vec::new()),
            widget: RefCell::new(None),
        });

        let on_load = {
            let weak = Rc::downgrade(&shared);
            move || {
                if let Some(shared) = weak.upgrade() {
                    shared.on_image_loaded();
                }
            }
        };
        let on_error = {
            let src = shared.image_src.clone();
            move || tracing::warn!(%src, "background image failed to load, nothing rendered")
        };
        let listeners = image::preload(&shared.image_src, on_load, on_error)?;
        *shared.preload.borrow_mut() = listeners;
        Ok(shared)
    }

    fn on_image_loaded(&self) {
        match Widget::mount(self) {
            Ok(widget) => {
                widget.bind_events(&self.config);
                *self.widget.borrow_mut() = Some(widget);
            }
            Err(err) => tracing::error!(%err, "failed to mount fragments"),
        }
    }
}

/// Latest pointer state waiting for the next animation frame.
#[derive(Copy, Clone, Debug)]
enum PointerUpdate {
    Move(Point),
    Leave,
}

/// Mounted fragments and their event plumbing.
struct Widget {
    host: HtmlElement,
    engine: RefCell<FragmentLayoutEngine<SmallRng>>,
    nodes: Vec<dom::FragmentNodes>,
    pointer: RefCell<FrameCoalescer<PointerUpdate>>,
    frame: RefCell<Option<AnimationFrame>>,
    resize: RefCell<Debouncer>,
    resize_timer: RefCell<Option<Timeout>>,
    listeners: RefCell<Vec<EventListener>>,
}

impl Widget {
    fn mount(shared: &Shared) -> Result<Rc<Self>, FragmentsError> {
        let document = document()?;
        let engine = FragmentLayoutEngine::new(
            shared.config.clone(),
            shared.support,
            container_size(&shared.host),
            SmallRng::seed_from_u64(entropy_seed()),
        );

        let nodes = engine
            .fragments()
            .iter()
            .map(|f| dom::FragmentNodes::build(&document, &shared.image_src, f))
            .collect::<Result<Vec<_>, _>>()?;
        dom::attach_all(
            &nodes,
            |n| n.attach(&shared.host),
            dom::FragmentNodes::unmount,
        )?;

        Ok(Rc::new(Self {
            host: shared.host.clone(),
            engine: RefCell::new(engine),
            nodes,
            pointer: RefCell::new(FrameCoalescer::new()),
            frame: RefCell::new(None),
            resize: RefCell::new(Debouncer::new(shared.config.resize_policy())),
            resize_timer: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        }))
    }

    fn bind_events(self: &Rc<Self>, config: &FragmentsConfig) {
        let mut listeners = Vec::new();

        if config.parallax {
            let weak = Rc::downgrade(self);
            listeners.push(EventListener::new(&self.host, "mousemove", move |event| {
                let Some(widget) = weak.upgrade() else { return };
                if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                    let page = Point::new(mouse.page_x() as f64, mouse.page_y() as f64);
                    widget.queue_pointer(PointerUpdate::Move(page));
                }
            }));

            let weak = Rc::downgrade(self);
            listeners.push(EventListener::new(&self.host, "mouseleave", move |_| {
                if let Some(widget) = weak.upgrade() {
                    widget.queue_pointer(PointerUpdate::Leave);
                }
            }));
        }

        if let Some(window) = web_sys::window() {
            let weak = Rc::downgrade(self);
            listeners.push(EventListener::new(&window, "resize", move |_| {
                if let Some(widget) = weak.upgrade() {
                    widget.schedule_resize();
                }
            }));
        }

        *self.listeners.borrow_mut() = listeners;
    }

    /// Coalesce pointer updates to one per animation frame.
    fn queue_pointer(self: &Rc<Self>, update: PointerUpdate) {
        if !self.pointer.borrow_mut().submit(update) {
            return;
        }
        let weak = Rc::downgrade(self);
        let handle = request_animation_frame(move |_| {
            let Some(widget) = weak.upgrade() else { return };
            widget.frame.borrow_mut().take();
            let pending = widget.pointer.borrow_mut().take();
            if let Some(update) = pending {
                widget.apply_pointer(update);
            }
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn apply_pointer(&self, update: PointerUpdate) {
        {
            let mut engine = self.engine.borrow_mut();
            match update {
                PointerUpdate::Move(page) => {
                    let bounds = container_bounds(&self.host);
                    engine.parallax_translate(page, &bounds);
                }
                PointerUpdate::Leave => engine.pointer_leave(),
            }
        }
        let engine = self.engine.borrow();
        for (nodes, fragment) in self.nodes.iter().zip(engine.fragments()) {
            if let Err(err) = nodes.paint_parallax(fragment) {
                tracing::warn!(%err, "failed to apply parallax offset");
            }
        }
    }

    /// Trailing-edge debounce: each resize replaces the pending timer.
    fn schedule_resize(self: &Rc<Self>) {
        let (ticket, delay_ms) = {
            let mut resize = self.resize.borrow_mut();
            (resize.schedule(), resize.policy().delay_ms)
        };
        let weak = Rc::downgrade(self);
        let timer = Timeout::new(delay_ms, move || {
            let Some(widget) = weak.upgrade() else { return };
            let current = widget.resize.borrow_mut().fire(ticket);
            if current {
                widget.relayout();
            }
        });
        *self.resize_timer.borrow_mut() = Some(timer);
    }

    fn relayout(&self) {
        {
            let mut engine = self.engine.borrow_mut();
            engine.recompute_on_resize(container_size(&self.host));
        }
        let engine = self.engine.borrow();
        for (nodes, fragment) in self.nodes.iter().zip(engine.fragments()) {
            if let Err(err) = nodes.paint_piece(fragment) {
                tracing::warn!(%err, "failed to reposition fragment");
            }
        }
    }

    fn teardown(&self) {
        self.listeners.borrow_mut().clear();
        self.resize.borrow_mut().cancel();
        self.resize_timer.borrow_mut().take();
        self.frame.borrow_mut().take();
        for nodes in &self.nodes {
            nodes.unmount();
        }
    }
}

fn document() -> Result<Document, FragmentsError> {
    web_sys::window()
        .ok_or(FragmentsError::NoWindow)?
        .document()
        .ok_or(FragmentsError::NoDocument)
}

fn container_size(host: &HtmlElement) -> ContainerSize {
    ContainerSize::new(host.offset_width() as f64, host.offset_height() as f64)
}

fn container_bounds(host: &HtmlElement) -> ContainerBounds {
    let rect = host.get_bounding_client_rect();
    let (scroll_left, scroll_top) = web_sys::window()
        .map(|w| scroll_offsets(&w))
        .unwrap_or_default();
    ContainerBounds {
        left: rect.left(),
        top: rect.top(),
        scroll_left,
        scroll_top,
    }
}

fn scroll_offsets(window: &Window) -> (f64, f64) {
    (
        window.scroll_x().unwrap_or_default(),
        window.scroll_y().unwrap_or_default(),
    )
}

/// Unseeded in production: 64 bits from `Math.random`.
fn entropy_seed() -> u64 {
    let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (hi << 32) | lo
}
