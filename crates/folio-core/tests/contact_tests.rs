// Host-side tests for the simulated contact form submission.

use folio_core::*;
use std::time::Duration;

fn filled() -> ContactForm {
    let mut form = ContactForm::new();
    form.set(ContactField::Name, "Ada");
    form.set(ContactField::Email, "ada@example.com");
    form.set(ContactField::Subject, "Hello");
    form.set(ContactField::Message, "Let's talk.");
    form
}

#[test]
fn submit_acknowledges_after_one_second_and_resets() {
    let q = TimerQueue::new();
    let mut form = filled();
    assert!(form.submit(&q));
    assert_eq!(form.status(), SubmitStatus::Submitting);
    assert_eq!(form.fields().name, "Ada");
    assert_eq!(form.acknowledgment(), None);

    q.advance(Duration::from_millis(999));
    assert!(form.is_submitting());

    q.advance(Duration::from_millis(1));
    assert_eq!(form.status(), SubmitStatus::Sent);
    assert_eq!(form.fields(), ContactFields::default());
    assert_eq!(form.acknowledgment(), Some(MESSAGE_SENT));
    assert_eq!(MESSAGE_SENT.title, "Message sent!");
}

#[test]
fn resubmit_while_in_flight_is_ignored() {
    let q = TimerQueue::new();
    let mut form = filled();
    assert!(form.submit(&q));
    q.advance(Duration::from_millis(500));
    assert!(!form.submit(&q));
    assert_eq!(q.pending(), 1);
    q.advance(Duration::from_millis(500));
    assert_eq!(form.status(), SubmitStatus::Sent);
}

#[test]
fn dismiss_returns_to_idle_and_allows_another_message() {
    let q = TimerQueue::new();
    let mut form = filled();
    form.submit(&q);
    q.advance(Duration::from_millis(1000));
    form.dismiss();
    assert_eq!(form.status(), SubmitStatus::Idle);
    assert_eq!(form.acknowledgment(), None);

    form.set(ContactField::Message, "Again");
    assert!(form.submit(&q));
}

#[test]
fn dropping_the_form_cancels_the_pending_submission() {
    let q = TimerQueue::new();
    let mut form = filled();
    form.submit(&q);
    drop(form);
    assert_eq!(q.pending(), 0);
    q.advance(Duration::from_secs(5));
}

#[test]
fn editing_during_submission_is_cleared_on_success() {
    let q = TimerQueue::new();
    let mut form = filled();
    form.submit(&q);
    form.set(ContactField::Subject, "changed");
    assert_eq!(form.fields().subject, "changed");
    q.advance(Duration::from_millis(1000));
    assert!(form.fields().subject.is_empty());
}
