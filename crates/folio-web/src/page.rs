//! DOM bindings for the profile views.
//!
//! Each binder looks up its elements by id and does nothing when the page
//! does not contain them.

use crate::dom::{self, escape_html, listen, set_hidden};
use crate::timeout::Ticker;
use folio_core::{
    about_skill_categories, achievement_icon, classify_line, contact_methods,
    home_skill_categories, social_links, top_achievements, AvatarFace, AvatarImage, AvatarStage,
    AvatarVariant, ContactField, ContactForm, FilterOutcome, LayoutGenerator, LineKind, LinkItem,
    MetricDisplay, Profile, Project, ProjectDetail, ProjectFilter, SkillCategory, SkillsMap,
    SubmitStatus, TerminalLine, TerminalView, TimerQueue, TypewriterPlayback, View, CHAR_DELAY_MS,
    FILTERS,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;
use wasm_bindgen::JsCast;
use web_sys as web;

// ---------------------------------------------------------------------------
// Code terminal
// ---------------------------------------------------------------------------

fn line_class(kind: LineKind) -> &'static str {
    match kind {
        LineKind::Comment => "code-comment",
        LineKind::Import => "code-import",
        LineKind::Definition => "code-def",
        LineKind::Assignment => "code-assign",
        LineKind::Plain => "code-plain",
    }
}

fn terminal_row(line: &TerminalLine, extra: &str) -> String {
    format!(
        "<div class=\"code-line {} {}\"><span class=\"line-no\">{}</span>{}</div>",
        line_class(line.kind),
        extra,
        line.number,
        escape_html(&line.text)
    )
}

pub fn render_terminal(document: &web::Document, playback: &TypewriterPlayback) {
    let Some(el) = document.get_element_by_id("code-terminal") else {
        return;
    };
    let view = TerminalView::snapshot(playback);
    let mut html = String::new();
    for line in &view.previous {
        html.push_str(&terminal_row(line, "faded"));
    }
    // tint by the full line so colour does not flicker while typing
    let full = playback
        .script()
        .line(playback.state().line_index)
        .unwrap_or_default();
    let current = TerminalLine {
        kind: classify_line(full),
        ..view.current
    };
    html.push_str(&terminal_row(&current, "current"));
    html.push_str("<span class=\"cursor\">|</span>");
    for line in &view.upcoming {
        html.push_str(&terminal_row(line, "upcoming"));
    }
    el.set_inner_html(&html);
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

fn tag_badges(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("<span class=\"tag\">{}</span>", escape_html(t)))
        .collect()
}

fn link_buttons(p: &Project) -> String {
    folio_core::project_links(p)
        .into_iter()
        .map(|(label, href)| {
            format!(
                "<a class=\"btn\" href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
                escape_html(href),
                label
            )
        })
        .collect()
}

fn project_card(index: usize, p: &Project) -> String {
    format!(
        "<article class=\"project\" data-project=\"{index}\"><div class=\"tags\">{}</div><h3>{}</h3><p>{}</p><span class=\"explore\">Click to explore</span></article>",
        tag_badges(&p.tags),
        escape_html(&p.title),
        escape_html(&p.summary),
    )
}

fn project_details(p: &Project) -> String {
    let highlights: String = p
        .highlights
        .iter()
        .map(|h| format!("<li>{}</li>", escape_html(h)))
        .collect();
    format!(
        "<div class=\"tags\">{}</div><h2>{}</h2><p>{}</p><h3>Key Highlights</h3><ul>{}</ul><div class=\"links\">{}</div>",
        tag_badges(&p.tags),
        escape_html(&p.title),
        escape_html(&p.summary),
        highlights,
        link_buttons(p)
    )
}

fn render_projects(document: &web::Document, profile: &Profile, filter: &ProjectFilter) {
    let Some(list) = document.get_element_by_id("project-list") else {
        return;
    };
    let html = match filter.apply(&profile.projects) {
        FilterOutcome::Matches(projects) => projects
            .into_iter()
            .filter_map(|p| {
                let index = profile.projects.iter().position(|q| std::ptr::eq(q, p))?;
                Some(project_card(index, p))
            })
            .collect(),
        outcome @ FilterOutcome::NoResults => format!(
            "<p class=\"no-results\">{}</p>",
            outcome.message().unwrap_or_default()
        ),
    };
    list.set_inner_html(&html);

    if let Ok(buttons) = document.query_selector_all("#project-filters button") {
        for i in 0..buttons.length() {
            let Some(btn) = buttons.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
                continue;
            };
            let active = btn.get_attribute("data-filter").as_deref() == Some(filter.label());
            let _ = btn.class_list().toggle_with_force("active", active);
        }
    }
}

fn render_project_detail(document: &web::Document, profile: &Profile, detail: &ProjectDetail) {
    let Some(modal) = document.get_element_by_id("project-modal") else {
        return;
    };
    match detail.project(&profile.projects) {
        Some(project) => {
            if let Some(body) = document.get_element_by_id("project-modal-body") {
                body.set_inner_html(&project_details(project));
            }
            set_hidden(&modal, false);
        }
        None => set_hidden(&modal, true),
    }
}

fn render_tag_cloud(document: &web::Document, profile: &Profile) {
    let Some(cloud) = document.get_element_by_id("project-tags") else {
        return;
    };
    let mut counts: Vec<(&str, usize)> = folio_core::tag_counts(&profile.projects)
        .into_iter()
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    let html: String = counts
        .into_iter()
        .map(|(tag, n)| format!("<span class=\"tag\">{} ({n})</span>", escape_html(tag)))
        .collect();
    cloud.set_inner_html(&html);
}

fn closest(ev: &web::Event, selector: &str) -> Option<web::Element> {
    let target = ev.target()?.dyn_into::<web::Element>().ok()?;
    target.closest(selector).ok().flatten()
}

pub fn bind_project_filters(document: &web::Document, profile: Rc<Profile>) {
    render_tag_cloud(document, &profile);
    let Some(bar) = document.get_element_by_id("project-filters") else {
        render_projects(document, &profile, &ProjectFilter::All);
        bind_project_detail(document, profile);
        return;
    };
    let counts = folio_core::filter_counts(&profile.projects);
    let buttons: String = FILTERS
        .iter()
        .map(|f| {
            format!(
                "<button data-filter=\"{f}\">{f} <span class=\"count\">{}</span></button>",
                counts.get(f).copied().unwrap_or(0)
            )
        })
        .collect();
    bar.set_inner_html(&buttons);
    render_projects(document, &profile, &ProjectFilter::All);

    let doc = document.clone();
    let filter_profile = profile.clone();
    listen(&bar, "click", move |ev: web::Event| {
        let Some(label) = closest(&ev, "button[data-filter]")
            .and_then(|b| b.get_attribute("data-filter"))
        else {
            return;
        };
        let filter = match ProjectFilter::from_str(&label) {
            Ok(f) => f,
            Err(never) => match never {},
        };
        render_projects(&doc, &filter_profile, &filter);
    });

    bind_project_detail(document, profile);
}

/// Card click opens the detail dialog; the backdrop or the close button
/// dismisses it.
fn bind_project_detail(document: &web::Document, profile: Rc<Profile>) {
    let (Some(list), Some(modal)) = (
        document.get_element_by_id("project-list"),
        document.get_element_by_id("project-modal"),
    ) else {
        return;
    };
    let detail = Rc::new(RefCell::new(ProjectDetail::new()));
    render_project_detail(document, &profile, &detail.borrow());

    let (doc, open_profile, opening) = (document.clone(), profile.clone(), detail.clone());
    listen(&list, "click", move |ev: web::Event| {
        let Some(index) = closest(&ev, "[data-project]")
            .and_then(|card| card.get_attribute("data-project"))
            .and_then(|raw| raw.parse::<usize>().ok())
        else {
            return;
        };
        let mut detail = opening.borrow_mut();
        if detail.open(index, &open_profile.projects) {
            render_project_detail(&doc, &open_profile, &detail);
        }
    });

    let doc = document.clone();
    let modal_el = modal.clone();
    listen(&modal, "click", move |ev: web::Event| {
        let on_backdrop = ev
            .target()
            .and_then(|t| t.dyn_into::<web::Element>().ok())
            .is_some_and(|t| t == modal_el);
        if on_backdrop || closest(&ev, "#project-modal-close").is_some() {
            let mut detail = detail.borrow_mut();
            detail.close();
            render_project_detail(&doc, &profile, &detail);
        }
    });
}

// ---------------------------------------------------------------------------
// Skills, achievements and contact details
// ---------------------------------------------------------------------------

fn skill_card(category: &SkillCategory<'_>, map: &SkillsMap) -> String {
    let hovered = map.is_hovered(category.title);
    let badges: String = category
        .skills
        .iter()
        .map(|s| {
            format!(
                "<button class=\"skill-badge{}\" data-skill=\"{}\">{}</button>",
                if map.is_selected(s) { " selected" } else { "" },
                escape_html(s),
                escape_html(s)
            )
        })
        .collect();
    let footer = if hovered {
        format!("<p class=\"mastered\">{}</p>", category.mastered_label())
    } else {
        String::new()
    };
    format!(
        "<div class=\"skill-card{}\" data-category=\"{}\"><h3>{}</h3><div class=\"skills\">{}</div>{}</div>",
        if hovered { " hovered" } else { "" },
        escape_html(category.title),
        escape_html(category.title),
        badges,
        footer
    )
}

fn render_skills_map(document: &web::Document, profile: &Profile, map: &SkillsMap) {
    let Some(el) = document.get_element_by_id("skills-map") else {
        return;
    };
    let html: String = home_skill_categories(&profile.skills)
        .iter()
        .map(|c| skill_card(c, map))
        .collect();
    el.set_inner_html(&html);
    if let Some(selection) = document.get_element_by_id("skill-selection") {
        match map.selection_heading() {
            Some(heading) => {
                selection.set_text_content(Some(&heading));
                set_hidden(&selection, false);
            }
            None => set_hidden(&selection, true),
        }
    }
}

/// Home page skills map: hover a card for its count, click a skill to
/// select it (again to clear).
pub fn bind_skills_map(document: &web::Document, profile: Rc<Profile>) {
    let Some(el) = document.get_element_by_id("skills-map") else {
        return;
    };
    let map = Rc::new(RefCell::new(SkillsMap::new()));
    render_skills_map(document, &profile, &map.borrow());

    let (doc, hover_profile, hovering) = (document.clone(), profile.clone(), map.clone());
    listen(&el, "mouseover", move |ev: web::Event| {
        let category = closest(&ev, "[data-category]").and_then(|c| c.get_attribute("data-category"));
        let mut map = hovering.borrow_mut();
        if map.hovered() != category.as_deref() {
            map.hover(category.as_deref());
            render_skills_map(&doc, &hover_profile, &map);
        }
    });

    let (doc, leave_profile, leaving) = (document.clone(), profile.clone(), map.clone());
    listen(&el, "mouseleave", move |_: web::Event| {
        let mut map = leaving.borrow_mut();
        if map.hovered().is_some() {
            map.hover(None);
            render_skills_map(&doc, &leave_profile, &map);
        }
    });

    let doc = document.clone();
    listen(&el, "click", move |ev: web::Event| {
        let Some(skill) = closest(&ev, "[data-skill]").and_then(|b| b.get_attribute("data-skill"))
        else {
            return;
        };
        let mut map = map.borrow_mut();
        map.toggle(&skill);
        render_skills_map(&doc, &profile, &map);
    });
}

fn link_card(item: &LinkItem) -> String {
    format!(
        "<a class=\"link-card\" href=\"{}\" target=\"_blank\" rel=\"noopener\"><h4>{}</h4><span>{}</span><p>{}</p></a>",
        escape_html(&item.href),
        item.title,
        escape_html(&item.value),
        escape_html(&item.description)
    )
}

/// Static profile sections: about page skills, achievements, contact
/// methods and social links.
pub fn render_profile_sections(document: &web::Document, profile: &Profile) {
    if let Some(el) = document.get_element_by_id("about-skills") {
        let html: String = about_skill_categories(&profile.skills)
            .iter()
            .map(|c| {
                let skills: String = c
                    .skills
                    .iter()
                    .map(|s| format!("<span class=\"tag\">{}</span>", escape_html(s)))
                    .collect();
                format!(
                    "<div class=\"skill-card\"><h3>{}</h3><div class=\"skills\">{}</div></div>",
                    escape_html(c.title),
                    skills
                )
            })
            .collect();
        el.set_inner_html(&html);
    }
    if let Some(el) = document.get_element_by_id("achievements") {
        let html: String = top_achievements(profile)
            .iter()
            .enumerate()
            .map(|(i, a)| {
                format!(
                    "<li class=\"achievement icon-{}\">{}</li>",
                    achievement_icon(i),
                    escape_html(a)
                )
            })
            .collect();
        el.set_inner_html(&html);
    }
    if let Some(el) = document.get_element_by_id("contact-methods") {
        let html: String = contact_methods(profile).iter().map(link_card).collect();
        el.set_inner_html(&html);
    }
    if let Some(el) = document.get_element_by_id("social-links") {
        let html: String = social_links(profile).iter().map(link_card).collect();
        el.set_inner_html(&html);
    }
}

/// Navigation bar with the current route highlighted.
pub fn render_nav(document: &web::Document) {
    let Some(nav) = document.get_element_by_id("site-nav") else {
        return;
    };
    let current = web::window()
        .and_then(|w| w.location().pathname().ok())
        .and_then(|path| View::from_path(&path));
    let html: String = View::ALL
        .iter()
        .map(|&v| {
            format!(
                "<a href=\"{}\" class=\"nav-link{}\">{}</a>",
                v.path(),
                if Some(v) == current { " active" } else { "" },
                v.label()
            )
        })
        .collect();
    nav.set_inner_html(&html);
}

// ---------------------------------------------------------------------------
// Contact form
// ---------------------------------------------------------------------------

/// Form state plus the last status painted into the DOM.
pub struct ContactBinding {
    form: ContactForm,
    painted: SubmitStatus,
}

impl ContactBinding {
    pub fn bind(document: &web::Document, timers: TimerQueue) -> Option<Rc<RefCell<Self>>> {
        let form_el = document.get_element_by_id("contact-form")?;
        let binding = Rc::new(RefCell::new(Self {
            form: ContactForm::new(),
            painted: SubmitStatus::Idle,
        }));

        let on_input = binding.clone();
        listen(&form_el, "input", move |ev: web::Event| {
            let Some(target) = ev.target() else {
                return;
            };
            let (name, value) = if let Some(input) = target.dyn_ref::<web::HtmlInputElement>() {
                (input.name(), input.value())
            } else if let Some(area) = target.dyn_ref::<web::HtmlTextAreaElement>() {
                (area.name(), area.value())
            } else {
                return;
            };
            match ContactField::from_str(&name) {
                Ok(field) => on_input.borrow_mut().form.set(field, value),
                Err(e) => log::debug!("[contact] {e}"),
            }
        });

        let on_submit = binding.clone();
        listen(&form_el, "submit", move |ev: web::Event| {
            ev.prevent_default();
            on_submit.borrow_mut().form.submit(&timers);
        });
        Some(binding)
    }

    /// Mirror status changes into the DOM; called once per animation frame.
    pub fn sync(&mut self, document: &web::Document) {
        let status = self.form.status();
        if status == self.painted {
            return;
        }
        self.painted = status;
        dom::set_text(
            document,
            "contact-submit",
            if status == SubmitStatus::Submitting {
                "Sending..."
            } else {
                "Send Message"
            },
        );
        if let Some(btn) = document
            .get_element_by_id("contact-submit")
            .and_then(|e| e.dyn_into::<web::HtmlButtonElement>().ok())
        {
            btn.set_disabled(status == SubmitStatus::Submitting);
        }
        if let Some(toast) = self.form.acknowledgment() {
            self.clear_inputs(document);
            dom::set_text(document, "toast-title", toast.title);
            dom::set_text(document, "toast-description", toast.description);
            if let Some(el) = document.get_element_by_id("toast") {
                set_hidden(&el, false);
            }
            // acknowledged; ready for another message
            self.form.dismiss();
        }
    }

    fn clear_inputs(&self, document: &web::Document) {
        let Ok(fields) = document.query_selector_all("#contact-form input, #contact-form textarea")
        else {
            return;
        };
        for i in 0..fields.length() {
            let Some(node) = fields.item(i) else {
                continue;
            };
            if let Some(input) = node.dyn_ref::<web::HtmlInputElement>() {
                input.set_value("");
            } else if let Some(area) = node.dyn_ref::<web::HtmlTextAreaElement>() {
                area.set_value("");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Metrics and avatar
// ---------------------------------------------------------------------------

pub fn paint_metrics(document: &web::Document, metrics: &[MetricDisplay]) {
    for (i, m) in metrics.iter().enumerate() {
        dom::set_text(document, &format!("metric-value-{i}"), m.display_value());
    }
}

/// Typed-out hero summary; the returned ticker owns the timeout chain.
pub fn start_hero_summary(document: &web::Document, summary: &str) -> Option<Ticker> {
    document.get_element_by_id("hero-summary")?;
    let playback = Rc::new(RefCell::new(TypewriterPlayback::once(
        summary,
        Duration::from_millis(CHAR_DELAY_MS),
    )));
    let first = playback.borrow().delay();
    let doc = document.clone();
    Some(Ticker::start(first, move || {
        let mut playback = playback.borrow_mut();
        let next = playback.tick();
        dom::set_text(&doc, "hero-summary", playback.current_text());
        next
    }))
}

/// Mount the avatar selected by `variant` inside `#avatar`.
///
/// The photo in `#avatar-photo` (if any) falls back to the initials and the
/// fallback rig when it fails to load.
pub fn mount_avatar(
    document: &web::Document,
    profile: &Profile,
    variant: AvatarVariant,
    timers: &TimerQueue,
    layout_gen: Rc<RefCell<LayoutGenerator>>,
) -> Option<Rc<RefCell<AvatarStage>>> {
    let frame = document.get_element_by_id("avatar")?;
    let img = document
        .get_element_by_id("avatar-photo")
        .and_then(|e| e.dyn_into::<web::HtmlImageElement>().ok());
    let photo = img.as_ref().map(|i| i.src()).filter(|s| !s.is_empty());
    let image = AvatarImage::new(photo, profile.initials());
    let stage = AvatarStage::mount(variant, image, timers, layout_gen.borrow_mut().rng_mut());
    let stage = Rc::new(RefCell::new(stage));
    paint_avatar_face(document, img.as_ref(), &stage.borrow());

    if let Some(img) = img {
        let doc = document.clone();
        let failing = stage.clone();
        let img_el = img.clone();
        listen(&img, "error", move |_: web::Event| {
            let mut stage = failing.borrow_mut();
            stage.photo_failed(layout_gen.borrow_mut().rng_mut());
            paint_avatar_face(&doc, Some(&img_el), &stage);
        });
    }

    // pointer parallax on the avatar container
    if let (Some(window), Ok(frame)) = (web::window(), frame.dyn_into::<web::HtmlElement>()) {
        listen(&window, "pointermove", move |ev: web::PointerEvent| {
            let Some(w) = web::window() else {
                return;
            };
            let cx = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) * 0.5;
            let cy = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) * 0.5;
            let offset = folio_core::parallax(glam::Vec2::new(
                (ev.client_x() as f64 - cx) as f32,
                (ev.client_y() as f64 - cy) as f32,
            ));
            let _ = frame.style().set_property(
                "transform",
                &format!("translate({}px, {}px)", offset.x, offset.y),
            );
        });
    }
    Some(stage)
}

fn paint_avatar_face(
    document: &web::Document,
    img: Option<&web::HtmlImageElement>,
    stage: &AvatarStage,
) {
    if let Some(frame) = document.get_element_by_id("avatar") {
        let _ = frame.set_attribute("data-variant", stage.variant().name());
    }
    let placeholder = document.get_element_by_id("avatar-initials");
    match stage.face() {
        AvatarFace::Photo(_) => {
            if let Some(img) = img {
                set_hidden(img, false);
            }
            if let Some(p) = placeholder {
                set_hidden(&p, true);
            }
        }
        AvatarFace::Placeholder(initials) => {
            if let Some(img) = img {
                set_hidden(img, true);
            }
            if let Some(p) = placeholder {
                p.set_text_content(Some(&initials));
                set_hidden(&p, false);
            }
        }
    }
}

/// Apply the rig pose at `t` to the `#avatar-part-<name>` elements.
pub fn paint_avatar_rig(document: &web::Document, stage: &AvatarStage, t: f64) {
    for pose in stage.pose(t) {
        let Some(el) = document
            .get_element_by_id(&format!("avatar-part-{}", pose.name))
            .and_then(|e| e.dyn_into::<web::HtmlElement>().ok())
        else {
            continue;
        };
        let tr = pose.transform;
        let style = el.style();
        let _ = style.set_property(
            "transform",
            &format!(
                "translate({:.2}px, {:.2}px) rotate({:.4}rad) scale({:.3}, {:.3})",
                tr.position.x, tr.position.y, tr.rotation.z, tr.scale.x, tr.scale.y
            ),
        );
        let _ = style.set_property("opacity", &format!("{:.3}", tr.opacity));
    }
    if let Some(bubble) = document.get_element_by_id("avatar-speech") {
        set_hidden(&bubble, !stage.speech_visible());
    }
}
