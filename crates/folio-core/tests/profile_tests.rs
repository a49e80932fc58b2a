// Host-side tests for the profile document and the page view models.

use folio_core::*;

const TWO_PROJECTS: &str = r#"{
  "name": "Ada Byron King",
  "role": "Engineer",
  "summary": "Builds things.",
  "location": "London, UK",
  "contact": {
    "email": "ada@example.com",
    "phone": "+44 1",
    "links": { "github": "https://github.com/ada", "linkedin": "https://linkedin.com/in/ada", "resume_pdf": "/cv.pdf" }
  },
  "skills": { "programming": ["Rust"], "ml": ["PyTorch"], "data": [], "viz": [], "cloud": ["AWS"], "tools": ["Git"] },
  "experience": [],
  "education": [{ "degree": "BSc", "school": "UCL", "dates": "2010", "location": "London" }],
  "achievements": ["a", "b", "c", "d", "e", "f", "g"],
  "certifications": [],
  "projects": [
    { "title": "Forecaster", "tags": ["ML"], "summary": "s", "highlights": [], "links": { "repo": "https://example.com/r" } },
    { "title": "Chatbot", "tags": ["NLP"], "summary": "s", "highlights": [], "links": {} }
  ]
}"#;

fn profile() -> Profile {
    Profile::from_json(TWO_PROJECTS).expect("fixture parses")
}

#[test]
fn embedded_profile_parses() {
    let p = Profile::embedded().expect("embedded profile is valid");
    assert!(!p.name.is_empty());
    assert!(!p.projects.is_empty());
}

#[test]
fn optional_fields_are_none_when_missing() {
    let p = profile();
    assert_eq!(p.education[0].note, None);
    assert_eq!(p.projects[1].links, ProjectLinks::default());
    assert_eq!(p.projects[0].links.repo.as_deref(), Some("https://example.com/r"));
}

#[test]
fn malformed_document_is_a_parse_error() {
    let err = Profile::from_json("{ \"name\": 3 }").unwrap_err();
    assert!(matches!(err, ProfileError::Parse(_)));
    assert!(err.to_string().starts_with("invalid profile document"));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Profile::load("/definitely/not/here.json").unwrap_err();
    match err {
        ProfileError::Io { path, .. } => assert!(path.ends_with("here.json")),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn initials_take_the_first_letter_of_each_word() {
    assert_eq!(profile().initials(), "ABK");
}

#[test]
fn ml_filter_selects_only_the_ml_project() {
    let p = profile();
    let filter: ProjectFilter = "ML".parse().unwrap();
    let outcome = filter.apply(&p.projects);
    let titles: Vec<&str> = outcome.projects().iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["Forecaster"]);
    assert_eq!(outcome.message(), None);
}

#[test]
fn all_filter_selects_everything() {
    let p = profile();
    let outcome = ProjectFilter::All.apply(&p.projects);
    assert_eq!(outcome.projects().len(), 2);
    assert_eq!("all".parse::<ProjectFilter>().unwrap(), ProjectFilter::All);
}

#[test]
fn unmatched_filter_reports_no_results() {
    let p = profile();
    let outcome = ProjectFilter::Tag("Computer Vision".into()).apply(&p.projects);
    assert_eq!(outcome, FilterOutcome::NoResults);
    assert!(outcome.projects().is_empty());
    assert_eq!(outcome.message(), Some(NO_PROJECTS_MESSAGE));
}

#[test]
fn filter_matches_substrings_ignoring_case() {
    let p = Profile::embedded().unwrap();
    let realtime = ProjectFilter::Tag("real-TIME".into()).apply(&p.projects);
    assert_eq!(realtime.projects().len(), 1);
    // vision and sentiment projects both carry it
    let deep = ProjectFilter::Tag("Deep Learning".into()).apply(&p.projects);
    assert_eq!(deep.projects().len(), 2);
}

#[test]
fn filter_bar_counts() {
    let p = profile();
    let counts = filter_counts(&p.projects);
    assert_eq!(counts.len(), FILTERS.len());
    assert_eq!(counts["All"], 2);
    assert_eq!(counts["ML"], 1);
    assert_eq!(counts["NLP"], 1);
    assert_eq!(counts["Deep Learning"], 0);

    let tags = tag_counts(&p.projects);
    assert_eq!(tags.get("ML"), Some(&1));
    assert_eq!(tags.get("Real-time"), None);
}

#[test]
fn project_link_buttons_only_for_present_links() {
    let p = profile();
    assert_eq!(project_links(&p.projects[0]), [("Code", "https://example.com/r")]);
    assert!(project_links(&p.projects[1]).is_empty());
}

#[test]
fn navigation_routes() {
    let paths: Vec<&str> = View::ALL.iter().map(|v| v.path()).collect();
    assert_eq!(paths, ["/", "/projects", "/about", "/contact"]);
    for v in View::ALL {
        assert_eq!(View::from_path(v.path()), Some(v));
    }
    assert_eq!(View::from_path("/blog"), None);
}

#[test]
fn skill_categories_for_home_and_about() {
    let p = profile();
    let home = home_skill_categories(&p.skills);
    assert_eq!(home.len(), 6);
    assert_eq!(home[4].title, "Cloud Platforms");
    assert_eq!(home[4].skills, ["AWS"]);

    let about = about_skill_categories(&p.skills);
    assert_eq!(about.len(), 5);
    assert_eq!(about[4].title, "Cloud & Tools");
    assert_eq!(about[4].skills, ["AWS", "Git"]);
}

#[test]
fn about_page_shows_five_achievements() {
    let p = profile();
    assert_eq!(top_achievements(&p), ["a", "b", "c", "d", "e"]);
    assert_eq!(achievement_icon(7), 1);
}

#[test]
fn contact_methods_and_social_links() {
    let p = profile();
    let methods = contact_methods(&p);
    let hrefs: Vec<&str> = methods.iter().map(|m| m.href.as_str()).collect();
    assert_eq!(hrefs, ["mailto:ada@example.com", "tel:+44 1", "#"]);
    assert_eq!(methods[2].description, "Based in London, UK");

    let social = social_links(&p);
    assert_eq!(social[0].title, "GitHub");
    assert_eq!(social[1].href, "https://linkedin.com/in/ada");
}

#[test]
fn clicking_the_selected_skill_again_clears_it() {
    let mut map = SkillsMap::new();
    map.toggle("Rust");
    assert_eq!(map.selected(), Some("Rust"));
    assert_eq!(map.selection_heading().as_deref(), Some("Selected: Rust"));

    map.toggle("Git");
    assert!(map.is_selected("Git"));
    assert!(!map.is_selected("Rust"));

    map.toggle("Git");
    assert_eq!(map.selected(), None);
    assert_eq!(map.selection_heading(), None);
}

#[test]
fn hovered_category_shows_its_skill_count() {
    let p = profile();
    let mut map = SkillsMap::new();
    map.hover(Some("Cloud Platforms"));
    let hovered: Vec<String> = home_skill_categories(&p.skills)
        .iter()
        .filter(|c| map.is_hovered(c.title))
        .map(SkillCategory::mastered_label)
        .collect();
    assert_eq!(hovered, ["1 technologies mastered"]);

    map.hover(None);
    assert_eq!(map.hovered(), None);
}

#[test]
fn project_detail_opens_and_closes() {
    let p = profile();
    let mut detail = ProjectDetail::new();
    assert!(!detail.is_open());

    assert!(detail.open(1, &p.projects));
    assert_eq!(detail.project(&p.projects).map(|pr| pr.title.as_str()), Some("Chatbot"));

    detail.close();
    assert!(!detail.is_open());
    assert_eq!(detail.project(&p.projects), None);

    assert!(!detail.open(9, &p.projects));
    assert_eq!(detail.selected_index(), None);
}
