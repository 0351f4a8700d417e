//! Record → ordered dynamic slides.

use rand::Rng;

use super::heatmap::heatmap_slide;
use super::org::org_slides;
use super::skills::stamp_slide;
use super::volunteer::{
    constellation_slide, gallery_slide, letter_slide, partner_names, tags_slide, timeline_slide,
};
use crate::presentation::dom::find_all_by_class;
use crate::presentation::markup::Element;
use crate::presentation::record::{FetchedRecord, UserRecord};
use crate::report::application::domain::entities::StatMap;

/// Work to run once the slides are in the deck.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostRender {
    /// Stats for the radar chart (volunteers only).
    pub radar: Option<StatMap>,
    /// Names for the constellation animation, when that slide exists.
    pub partner_names: Option<Vec<String>>,
    /// Number of nested horizontal carousels to initialise.
    pub nested_carousels: usize,
}

#[derive(Debug, Clone)]
pub struct GeneratedSlides {
    pub slides: Vec<Element>,
    pub post: PostRender,
}

fn volunteer_slides(user: &UserRecord, rng: &mut impl Rng) -> (Vec<Element>, PostRender) {
    let mut slides = vec![
        stamp_slide(&user.stats),
        timeline_slide(&user.milestones),
        heatmap_slide(&user.activities),
        gallery_slide(&user.activities, rng),
    ];

    let mut post = PostRender {
        radar: Some(user.stats),
        ..Default::default()
    };

    if !user.co_volunteers.is_empty() {
        slides.push(constellation_slide(user.co_volunteers.len()));
        post.partner_names = Some(partner_names(&user.co_volunteers));
    }

    slides.push(letter_slide(&user.name, &user.letter_paragraphs()));
    slides.push(tags_slide(&user.tags));

    (slides, post)
}

/// Builds the slide set the record selects: seven (or six without
/// collaborators) for a volunteer, three for the organisation overview.
pub fn generate(record: &FetchedRecord, rng: &mut impl Rng) -> GeneratedSlides {
    let (slides, mut post) = match record {
        FetchedRecord::Volunteer(user) => volunteer_slides(user, rng),
        FetchedRecord::Organization(org) => (org_slides(org, rng), PostRender::default()),
    };

    post.nested_carousels = slides
        .iter()
        .map(|slide| find_all_by_class(slide, "swiper-h").len())
        .sum();

    GeneratedSlides { slides, post }
}
