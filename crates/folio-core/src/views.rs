//! Page-level view models: navigation, project filtering, skills and the
//! contact form.

use crate::constants::*;
use crate::profile::{Profile, Project, Skills};
use crate::timers::{TimerHandle, TimerQueue};
use fnv::FnvHashMap;
use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Projects,
    About,
    Contact,
}

impl View {
    pub const ALL: [View; 4] = [View::Home, View::Projects, View::About, View::Contact];

    pub fn path(self) -> &'static str {
        match self {
            View::Home => "/",
            View::Projects => "/projects",
            View::About => "/about",
            View::Contact => "/contact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Projects => "Projects",
            View::About => "About",
            View::Contact => "Contact",
        }
    }

    /// Exact route match; a trailing slash is tolerated on non-root paths.
    pub fn from_path(path: &str) -> Option<View> {
        let trimmed = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        View::ALL.into_iter().find(|v| v.path() == trimmed)
    }
}

/// A labelled outbound link (contact method, social profile, project link).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkItem {
    pub title: &'static str,
    pub value: String,
    pub href: String,
    pub description: String,
}

pub fn social_links(profile: &Profile) -> Vec<LinkItem> {
    let links = &profile.contact.links;
    vec![
        LinkItem {
            title: "GitHub",
            value: links.github.clone(),
            href: links.github.clone(),
            description: "Check out my code".into(),
        },
        LinkItem {
            title: "LinkedIn",
            value: links.linkedin.clone(),
            href: links.linkedin.clone(),
            description: "Let's connect professionally".into(),
        },
    ]
}

pub fn contact_methods(profile: &Profile) -> Vec<LinkItem> {
    vec![
        LinkItem {
            title: "Email",
            value: profile.contact.email.clone(),
            href: profile.mailto(),
            description: "Drop me a line anytime".into(),
        },
        LinkItem {
            title: "Phone",
            value: profile.contact.phone.clone(),
            href: profile.tel(),
            description: "Let's have a chat".into(),
        },
        LinkItem {
            title: "Location",
            value: profile.location.clone(),
            href: "#".into(),
            description: format!("Based in {}", profile.location),
        },
    ]
}

/// Buttons for the links a project actually has, in repo/demo/report order.
pub fn project_links(project: &Project) -> Vec<(&'static str, &str)> {
    let l = &project.links;
    [("Code", &l.repo), ("Demo", &l.demo), ("Report", &l.report)]
        .into_iter()
        .filter_map(|(label, href)| href.as_deref().map(|h| (label, h)))
        .collect()
}

// ---------------------------------------------------------------------------
// Project filtering
// ---------------------------------------------------------------------------

pub const FILTERS: [&str; 6] = ["All", "ML", "Computer Vision", "NLP", "Real-time", "Deep Learning"];

pub const NO_PROJECTS_MESSAGE: &str = "No projects found for the selected filter.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ProjectFilter {
    #[default]
    All,
    Tag(String),
}

impl ProjectFilter {
    pub fn label(&self) -> &str {
        match self {
            ProjectFilter::All => "All",
            ProjectFilter::Tag(t) => t,
        }
    }

    /// Any tag containing the filter text, ignoring case.
    pub fn matches(&self, project: &Project) -> bool {
        match self {
            ProjectFilter::All => true,
            ProjectFilter::Tag(needle) => {
                let needle = needle.to_lowercase();
                project
                    .tags
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&needle))
            }
        }
    }

    pub fn apply<'a>(&self, projects: &'a [Project]) -> FilterOutcome<'a> {
        let matched: Vec<&Project> = projects.iter().filter(|p| self.matches(p)).collect();
        if matched.is_empty() {
            log::debug!("[projects] no match for filter {:?}", self.label());
            FilterOutcome::NoResults
        } else {
            FilterOutcome::Matches(matched)
        }
    }
}

impl FromStr for ProjectFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s.eq_ignore_ascii_case("all") {
            ProjectFilter::All
        } else {
            ProjectFilter::Tag(s.to_string())
        })
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum FilterOutcome<'a> {
    Matches(Vec<&'a Project>),
    NoResults,
}

impl<'a> FilterOutcome<'a> {
    pub fn projects(&self) -> &[&'a Project] {
        match self {
            FilterOutcome::Matches(p) => p,
            FilterOutcome::NoResults => &[],
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            FilterOutcome::Matches(_) => None,
            FilterOutcome::NoResults => Some(NO_PROJECTS_MESSAGE),
        }
    }
}

/// Number of projects each filter button would show.
pub fn filter_counts(projects: &[Project]) -> FnvHashMap<&'static str, usize> {
    FILTERS
        .iter()
        .map(|&f| {
            let filter: ProjectFilter = match f.parse() {
                Ok(filter) => filter,
                Err(never) => match never {},
            };
            (f, projects.iter().filter(|p| filter.matches(p)).count())
        })
        .collect()
}

/// Exact tag occurrences across all projects.
pub fn tag_counts(projects: &[Project]) -> FnvHashMap<&str, usize> {
    let mut counts = FnvHashMap::default();
    for tag in projects.iter().flat_map(|p| p.tags.iter()) {
        *counts.entry(tag.as_str()).or_insert(0) += 1;
    }
    counts
}

// ---------------------------------------------------------------------------
// Skills and achievements
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillCategory<'a> {
    pub title: &'static str,
    pub skills: Vec<&'a str>,
}

fn category<'a>(title: &'static str, lists: &[&'a [String]]) -> SkillCategory<'a> {
    SkillCategory {
        title,
        skills: lists
            .iter()
            .flat_map(|l| l.iter().map(String::as_str))
            .collect(),
    }
}

/// Six categories shown on the home page skills map.
pub fn home_skill_categories(skills: &Skills) -> Vec<SkillCategory<'_>> {
    vec![
        category("Programming", &[&skills.programming]),
        category("Machine Learning", &[&skills.ml]),
        category("Data Processing", &[&skills.data]),
        category("Visualization", &[&skills.viz]),
        category("Cloud Platforms", &[&skills.cloud]),
        category("Tools & DevOps", &[&skills.tools]),
    ]
}

/// Five categories on the about page; cloud and tools share one card.
pub fn about_skill_categories(skills: &Skills) -> Vec<SkillCategory<'_>> {
    vec![
        category("Programming Languages", &[&skills.programming]),
        category("Machine Learning", &[&skills.ml]),
        category("Data Processing", &[&skills.data]),
        category("Visualization", &[&skills.viz]),
        category("Cloud & Tools", &[&skills.cloud, &skills.tools]),
    ]
}

impl SkillCategory<'_> {
    /// Footer shown while the category card is hovered.
    pub fn mastered_label(&self) -> String {
        format!("{} technologies mastered", self.skills.len())
    }
}

/// Hover and selection state of the home page skills map.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkillsMap {
    hovered: Option<String>,
    selected: Option<String>,
}

impl SkillsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer entered a category card (`Some`) or left it (`None`).
    pub fn hover(&mut self, category: Option<&str>) {
        self.hovered = category.map(str::to_string);
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn is_hovered(&self, category: &str) -> bool {
        self.hovered() == Some(category)
    }

    /// Clicking the selected skill again clears the selection.
    pub fn toggle(&mut self, skill: &str) {
        if self.is_selected(skill) {
            self.selected = None;
        } else {
            self.selected = Some(skill.to_string());
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_selected(&self, skill: &str) -> bool {
        self.selected() == Some(skill)
    }

    pub fn selection_heading(&self) -> Option<String> {
        self.selected().map(|s| format!("Selected: {s}"))
    }
}

pub fn top_achievements(profile: &Profile) -> &[String] {
    let n = profile.achievements.len().min(TOP_ACHIEVEMENTS);
    &profile.achievements[..n]
}

/// Icon slot for an achievement; six icons used round-robin.
pub fn achievement_icon(index: usize) -> usize {
    index % ACHIEVEMENT_ICON_COUNT
}

/// Which project card is expanded into the detail dialog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProjectDetail {
    selected: Option<usize>,
}

impl ProjectDetail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the dialog for `projects[index]`; out of range indices are ignored.
    pub fn open(&mut self, index: usize, projects: &[Project]) -> bool {
        if index >= projects.len() {
            log::debug!("[projects] no project at index {index}");
            return false;
        }
        self.selected = Some(index);
        true
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn project<'a>(&self, projects: &'a [Project]) -> Option<&'a Project> {
        self.selected.and_then(|i| projects.get(i))
    }
}

// ---------------------------------------------------------------------------
// Contact form
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl FromStr for ContactField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(ContactField::Name),
            "email" => Ok(ContactField::Email),
            "subject" => Ok(ContactField::Subject),
            "message" => Ok(ContactField::Message),
            other => Err(format!("unknown contact field {other:?}")),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Submitting,
    Sent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Toast {
    pub title: &'static str,
    pub description: &'static str,
}

pub const MESSAGE_SENT: Toast = Toast {
    title: "Message sent!",
    description: "Thanks for reaching out. I'll get back to you soon.",
};

#[derive(Default)]
struct FormState {
    fields: ContactFields,
    status: SubmitStatus,
}

/// Contact form with a simulated network round trip.
///
/// Submission always succeeds after [`CONTACT_SUBMIT_DELAY_MS`]; the pending
/// timer is cancelled if the form is dropped first.
#[derive(Default)]
pub struct ContactForm {
    state: Rc<RefCell<FormState>>,
    pending: Option<TimerHandle>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> ContactFields {
        self.state.borrow().fields.clone()
    }

    pub fn status(&self) -> SubmitStatus {
        self.state.borrow().status
    }

    pub fn is_submitting(&self) -> bool {
        self.status() == SubmitStatus::Submitting
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let mut state = self.state.borrow_mut();
        let value = value.into();
        match field {
            ContactField::Name => state.fields.name = value,
            ContactField::Email => state.fields.email = value,
            ContactField::Subject => state.fields.subject = value,
            ContactField::Message => state.fields.message = value,
        }
    }

    /// Start a submission. Returns `false` if one is already in flight.
    pub fn submit(&mut self, queue: &TimerQueue) -> bool {
        if self.is_submitting() {
            log::debug!("[contact] submit ignored; already in flight");
            return false;
        }
        self.state.borrow_mut().status = SubmitStatus::Submitting;
        let state = self.state.clone();
        self.pending = Some(queue.after(
            Duration::from_millis(CONTACT_SUBMIT_DELAY_MS),
            move || {
                let mut state = state.borrow_mut();
                state.fields = ContactFields::default();
                state.status = SubmitStatus::Sent;
                log::info!("[contact] message sent");
            },
        ));
        true
    }

    /// The toast to show once the message has been sent.
    pub fn acknowledgment(&self) -> Option<Toast> {
        (self.status() == SubmitStatus::Sent).then_some(MESSAGE_SENT)
    }

    /// Dismiss the toast; the form becomes idle again.
    pub fn dismiss(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.status == SubmitStatus::Sent {
            state.status = SubmitStatus::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_trailing_slash() {
        assert_eq!(View::from_path("/about/"), Some(View::About));
        assert_eq!(View::from_path(""), Some(View::Home));
        assert_eq!(View::from_path("/missing"), None);
    }

    #[test]
    fn contact_field_names() {
        assert_eq!("subject".parse::<ContactField>(), Ok(ContactField::Subject));
        assert!("phone".parse::<ContactField>().is_err());
    }
}
