use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::render::{AnimationFrame, request_animation_frame};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

use catyarn_core::scene::{BallSource, ROPE_WIDTH, ball_source, yarn_strand_width, yarn_strands};
use catyarn_core::{
    BounceSimulator, BounceStep, CatYarnConfig, SceneFrame, ScrollTracker, map_geometry,
};

use crate::diag;
use crate::dom;

const STRAND_COLOR: &str = "rgba(255, 255, 255, 0.45)";

/// SVG nodes that make up the yarn ball.
struct BallNodes {
    group: Element,
    vector: Element,
    circle: Element,
    strands: Vec<Element>,
    image: Option<Element>,
}

/// One mounted overlay. Shared through `Rc` between the host handle, the
/// event listeners and the animation-frame callback; all of it runs on the
/// browser main thread.
pub struct Widget {
    config: CatYarnConfig,
    window: Window,
    root: HtmlElement,
    svg: Element,
    rope: Element,
    ball: BallNodes,
    cat: Element,
    tracker: RefCell<ScrollTracker>,
    bounce: RefCell<BounceSimulator>,
    ball_image_failed: Cell<bool>,
    listeners: RefCell<Vec<EventListener>>,
    frame: RefCell<Option<AnimationFrame>>,
}

impl Widget {
    /// Build the overlay DOM inside `container` and start tracking scroll.
    pub fn mount(container: &Element, config: CatYarnConfig) -> Result<Rc<Self>, JsValue> {
        let window = dom::window()?;
        let document = dom::document(&window)?;

        let root: HtmlElement = document.create_element("div")?.dyn_into()?;
        dom::set_attrs(&root, &[("class", "catyarn"), ("aria-hidden", "true")]);

        let svg = dom::create_svg_element(&document, "svg")?;
        dom::set_attrs(
            &svg,
            &[
                ("xmlns", dom::SVG_NS),
                ("class", "catyarn-scene"),
                ("style", "display:block;position:absolute;inset:0;z-index:10"),
            ],
        );

        let rope = dom::create_svg_element(&document, "path")?;
        let stroke_width = ROPE_WIDTH.to_string();
        dom::set_attrs(
            &rope,
            &[
                ("fill", "none"),
                ("stroke", config.color.as_str()),
                ("stroke-width", stroke_width.as_str()),
                ("stroke-linecap", "round"),
                ("stroke-linejoin", "round"),
                ("style", "pointer-events:none"),
            ],
        );

        let ball = build_ball(&document, &config)?;

        svg.append_child(&rope)?;
        svg.append_child(&ball.group)?;

        let cat = document.create_element("img")?;
        let cat_width = config.cat_width.to_string();
        dom::set_attrs(
            &cat,
            &[
                ("src", config.cat_src.as_str()),
                ("alt", ""),
                ("draggable", "false"),
                ("width", cat_width.as_str()),
            ],
        );
        let _ = cat.set_attribute(
            "style",
            &format!(
                "position:absolute;right:0;top:0;z-index:0;display:block;object-fit:contain;\
                 border:0;border-radius:0;box-shadow:none;width:{}px;height:auto",
                config.cat_width
            ),
        );

        root.append_child(&svg)?;
        root.append_child(&cat)?;
        container.append_child(&root)?;

        let reduce_motion = dom::prefers_reduced_motion(&window);
        let tracker = ScrollTracker::mount(dom::scroll_metrics(&window), reduce_motion);
        let bounce = BounceSimulator::new(config.physics.clone());

        let widget = Rc::new(Self {
            config,
            window,
            root,
            svg,
            rope,
            ball,
            cat,
            tracker: RefCell::new(tracker),
            bounce: RefCell::new(bounce),
            ball_image_failed: Cell::new(false),
            listeners: RefCell::new(Vec::new()),
            frame: RefCell::new(None),
        });
        widget.install_listeners();
        widget.render();
        diag::console_debug!("catyarn mounted (reduce motion: {reduce_motion})");
        Ok(widget)
    }

    fn install_listeners(self: &Rc<Self>) {
        let mut listeners = Vec::new();

        let view = Rc::clone(self);
        listeners.push(EventListener::new(&self.window, "resize", move |_event| {
            view.on_resize();
        }));

        // Reduced motion: progress stays at its mount-time value
        if !self.tracker.borrow().reduce_motion() {
            let view = Rc::clone(self);
            listeners.push(EventListener::new_with_options(
                &self.window,
                "scroll",
                EventListenerOptions {
                    phase: EventListenerPhase::Bubble,
                    passive: true,
                },
                move |_event| {
                    view.on_scroll();
                },
            ));
        }

        let view = Rc::clone(self);
        listeners.push(EventListener::new(&self.ball.group, "click", move |_event| {
            view.bounce();
        }));

        let view = Rc::clone(self);
        listeners.push(EventListener::new(&self.cat, "error", move |_event| {
            diag::console_warn!("catyarn: decorative image failed to load");
            let _ = view.cat.set_attribute("style", "display:none");
        }));

        if let Some(image) = &self.ball.image {
            let view = Rc::clone(self);
            listeners.push(EventListener::new(image, "error", move |_event| {
                diag::console_warn!("catyarn: ball image failed to load, drawing yarn instead");
                view.ball_image_failed.set(true);
                view.render();
            }));
        }

        *self.listeners.borrow_mut() = listeners;
    }

    fn on_scroll(&self) {
        let metrics = dom::scroll_metrics(&self.window);
        let changed = self.tracker.borrow_mut().on_scroll(metrics);
        if changed {
            self.render();
        }
    }

    fn on_resize(&self) {
        let height = dom::viewport_height(&self.window);
        self.tracker.borrow_mut().on_resize(height);
        // Width may have crossed the visibility breakpoint even if height did not change
        self.render();
    }

    /// Kick the ball with the impulse for the current rope extension.
    /// Returns `false` if a bounce was already running.
    pub fn bounce(self: &Rc<Self>) -> bool {
        let impulse = {
            let tracker = self.tracker.borrow();
            map_geometry(tracker.progress(), tracker.viewport_height(), &self.config)
                .bounce_impulse
        };
        let started = self
            .bounce
            .borrow_mut()
            .trigger(impulse, dom::now_ms(&self.window));
        if started {
            diag::console_debug!("catyarn: bounce started (impulse {impulse})");
            self.render();
            self.schedule_frame();
        }
        started
    }

    pub fn is_bouncing(&self) -> bool {
        self.bounce.borrow().is_running()
    }

    fn schedule_frame(self: &Rc<Self>) {
        if self.frame.borrow().is_some() {
            return;
        }
        let view = Rc::clone(self);
        let handle = request_animation_frame(move |timestamp| {
            view.on_frame(timestamp);
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn on_frame(self: &Rc<Self>, timestamp: f64) {
        self.frame.borrow_mut().take();
        let step = self.bounce.borrow_mut().step(timestamp);
        self.render();
        match step {
            BounceStep::Moving => self.schedule_frame(),
            BounceStep::Settled => {
                let hits = self.bounce.borrow().floor_hits();
                diag::console_debug!("catyarn: ball settled after {hits} floor hits");
            },
        }
    }

    fn render(&self) {
        let frame = {
            let tracker = self.tracker.borrow();
            let bounce = self.bounce.borrow();
            SceneFrame::compose(
                &tracker,
                &bounce,
                &self.config,
                dom::viewport_width(&self.window),
            )
        };

        let _ = self
            .root
            .set_attribute("style", &frame.overlay_style(&self.config));

        let width = frame.box_width().to_string();
        let height = frame.box_height().to_string();
        dom::set_attrs(
            &self.svg,
            &[
                ("viewBox", frame.view_box().as_str()),
                ("width", width.as_str()),
                ("height", height.as_str()),
            ],
        );
        let _ = self.rope.set_attribute("d", &frame.rope_path());

        dom::set_attrs(
            &self.ball.group,
            &[
                ("transform", frame.ball_transform().as_str()),
                ("style", frame.ball_style().as_str()),
            ],
        );
        self.render_ball(frame.ball_diameter());
    }

    fn render_ball(&self, diameter: f64) {
        let use_image = ball_source(self.ball.image.is_some(), self.ball_image_failed.get())
            == BallSource::Image;

        if let Some(image) = &self.ball.image {
            if use_image {
                let half = (-diameter / 2.0).to_string();
                let size = diameter.to_string();
                let _ = image.remove_attribute("display");
                dom::set_attrs(
                    image,
                    &[
                        ("x", half.as_str()),
                        ("y", half.as_str()),
                        ("width", size.as_str()),
                        ("height", size.as_str()),
                    ],
                );
            } else {
                let _ = image.set_attribute("display", "none");
            }
        }

        if use_image {
            let _ = self.ball.vector.set_attribute("display", "none");
            return;
        }
        let _ = self.ball.vector.remove_attribute("display");
        let _ = self
            .ball
            .circle
            .set_attribute("r", &(diameter / 2.0).to_string());
        let strand_width = yarn_strand_width(diameter).to_string();
        for (node, d) in self.ball.strands.iter().zip(yarn_strands(diameter)) {
            dom::set_attrs(node, &[("d", d.as_str()), ("stroke-width", strand_width.as_str())]);
        }
    }

    /// Release listeners and any pending frame, then detach the overlay.
    pub fn unmount(&self) {
        self.listeners.borrow_mut().clear();
        self.frame.borrow_mut().take();
        self.bounce.borrow_mut().cancel();
        self.root.remove();
        diag::console_debug!("catyarn unmounted");
    }
}

fn build_ball(document: &Document, config: &CatYarnConfig) -> Result<BallNodes, JsValue> {
    let group = dom::create_svg_element(document, "g")?;
    let vector = dom::create_svg_element(document, "g")?;

    let circle = dom::create_svg_element(document, "circle")?;
    dom::set_attrs(
        &circle,
        &[("cx", "0"), ("cy", "0"), ("fill", config.color.as_str())],
    );
    vector.append_child(&circle)?;

    let mut strands = Vec::with_capacity(3);
    for _ in 0..3 {
        let strand = dom::create_svg_element(document, "path")?;
        dom::set_attrs(
            &strand,
            &[
                ("fill", "none"),
                ("stroke", STRAND_COLOR),
                ("stroke-linecap", "round"),
            ],
        );
        vector.append_child(&strand)?;
        strands.push(strand);
    }
    group.append_child(&vector)?;

    let image = match config.ball_image() {
        Some(src) => {
            let image = dom::create_svg_element(document, "image")?;
            dom::set_attrs(
                &image,
                &[("href", src), ("preserveAspectRatio", "xMidYMid meet")],
            );
            group.append_child(&image)?;
            Some(image)
        },
        None => None,
    };

    Ok(BallNodes {
        group,
        vector,
        circle,
        strands,
        image,
    })
}
