#![cfg(target_arch = "wasm32")]
use folio_core::{
    default_metrics, ml_pipeline_script, AvatarStage, AvatarVariant, Backdrop, FrameClock,
    FrameRenderer, LayoutGenerator, MetricDisplay, PlaybackTiming, Profile, SceneComposer,
    SceneConfig, TimerQueue, TypewriterPlayback,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

mod dom;
mod page;
mod render;
mod timeout;

use page::ContactBinding;
use render::Canvas2dRenderer;
use timeout::Ticker;

const PROFILE_URL: &str = "portfolio.json";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn fetch_profile(url: &str) -> anyhow::Result<Profile> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let request: js_sys::Promise = window.fetch_with_str(url);
    let resp: web::Response = JsFuture::from(request)
        .await
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    if !resp.ok() {
        anyhow::bail!("GET {url} returned {}", resp.status());
    }
    let text = JsFuture::from(resp.text().map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?)
        .await
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?
        .as_string()
        .ok_or_else(|| anyhow::anyhow!("profile body is not text"))?;
    Ok(Profile::from_json(&text)?)
}

async fn load_profile() -> anyhow::Result<Profile> {
    match fetch_profile(PROFILE_URL).await {
        Ok(p) => Ok(p),
        Err(e) => {
            log::warn!("[profile] {e:#}; using embedded profile");
            Ok(Profile::embedded()?)
        }
    }
}

/// Per-page animation state driven by requestAnimationFrame.
struct FrameContext {
    document: web::Document,
    canvas: Option<web::HtmlCanvasElement>,
    renderer: Option<Canvas2dRenderer>,
    scene: SceneComposer,
    clock: FrameClock,
    timers: TimerQueue,
    contact: Option<Rc<RefCell<ContactBinding>>>,
    metrics: Vec<MetricDisplay>,
    avatar: Option<Rc<RefCell<AvatarStage>>>,
}

impl FrameContext {
    fn frame(&mut self) {
        let time = self.clock.snapshot();
        self.timers.advance(time.dt);

        if let (Some(canvas), Some(renderer)) = (&self.canvas, &mut self.renderer) {
            dom::sync_canvas_backing_size(canvas);
            renderer.backdrop = self.scene.backdrop();
            let frame = self.scene.compose(time.elapsed_sec);
            if let Err(e) = renderer.render(&frame) {
                log::error!("render error: {:?}", e);
            }
        }
        if let Some(contact) = &self.contact {
            contact.borrow_mut().sync(&self.document);
        }
        page::paint_metrics(&self.document, &self.metrics);
        if let Some(avatar) = &self.avatar {
            page::paint_avatar_rig(&self.document, &avatar.borrow(), time.elapsed_sec);
        }
    }
}

fn backdrop_from_page(document: &web::Document) -> Backdrop {
    document
        .body()
        .and_then(|b| b.get_attribute("data-backdrop"))
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}

fn avatar_from_page(document: &web::Document) -> AvatarVariant {
    document
        .body()
        .and_then(|b| b.get_attribute("data-avatar"))
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let profile = Rc::new(load_profile().await?);
    log::info!("[profile] {} ({})", profile.name, profile.role);

    let canvas = document
        .get_element_by_id("scene-canvas")
        .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok());
    let renderer = match &canvas {
        Some(c) => Some(Canvas2dRenderer::new(c.clone())?),
        None => {
            log::warn!("missing #scene-canvas; backdrop disabled");
            None
        }
    };

    let mut generator = LayoutGenerator::from_entropy();
    let scene = SceneComposer::new(
        SceneConfig {
            backdrop: backdrop_from_page(&document),
            ..SceneConfig::default()
        },
        &mut generator,
    );
    let generator = Rc::new(RefCell::new(generator));

    let timers = TimerQueue::new();
    let metrics = default_metrics()
        .into_iter()
        .map(|card| MetricDisplay::start(&timers, card))
        .collect();
    let contact = ContactBinding::bind(&document, timers.clone());
    let avatar = page::mount_avatar(
        &document,
        &profile,
        avatar_from_page(&document),
        &timers,
        generator.clone(),
    );

    page::render_nav(&document);
    page::render_profile_sections(&document, &profile);
    page::bind_skills_map(&document, profile.clone());
    page::bind_project_filters(&document, profile.clone());

    let frame_ctx = Rc::new(RefCell::new(FrameContext {
        document: document.clone(),
        canvas,
        renderer,
        scene,
        clock: FrameClock::new(),
        timers,
        contact,
        metrics,
        avatar,
    }));

    {
        let ctx = frame_ctx.clone();
        let layout_gen = generator.clone();
        dom::add_click_listener(&document, "regenerate-scene", move || {
            let mut ctx = ctx.borrow_mut();
            ctx.scene.regenerate(&mut layout_gen.borrow_mut());
        });
    }
    for backdrop in Backdrop::ALL {
        let ctx = frame_ctx.clone();
        let layout_gen = generator.clone();
        dom::add_click_listener(&document, &format!("backdrop-{}", backdrop.name()), move || {
            ctx.borrow_mut()
                .scene
                .set_backdrop(backdrop, &mut layout_gen.borrow_mut());
        });
    }

    start_typewriter(document.clone());
    if let Some(ticker) = page::start_hero_summary(&document, &profile.summary) {
        keep_ticker(ticker);
    }
    start_loop(frame_ctx);
    Ok(())
}

/// Typewriter for `#code-terminal`; runs for the lifetime of the page.
fn start_typewriter(document: web::Document) {
    if document.get_element_by_id("code-terminal").is_none() {
        return;
    }
    let playback = Rc::new(RefCell::new(TypewriterPlayback::new(
        ml_pipeline_script(),
        PlaybackTiming::default(),
    )));
    page::render_terminal(&document, &playback.borrow());
    let first = playback.borrow().delay();
    let ticking = playback.clone();
    let ticker = Ticker::start(first, move || {
        let next = ticking.borrow_mut().tick();
        page::render_terminal(&document, &ticking.borrow());
        next
    });
    keep_ticker(ticker);
}

thread_local! {
    // Page-lifetime timeout chains (code terminal, hero summary).
    static TICKERS: RefCell<Vec<Ticker>> = const { RefCell::new(Vec::new()) };
}

fn keep_ticker(ticker: Ticker) {
    TICKERS.with(|slot| slot.borrow_mut().push(ticker));
}

fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        if let Some(w) = web::window() {
            if let Some(cb) = tick_clone.borrow().as_ref() {
                let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
            }
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        if let Some(cb) = tick.borrow().as_ref() {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }
}
