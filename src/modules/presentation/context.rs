//! The page's single application context: the deck, the overlay layer, the
//! current record and every widget's state, owned in one place and passed
//! explicitly to whatever needs it.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

use super::animation;
use super::carousel::{Carousel, GATE_INDEX};
use super::dom::{find_by_id, find_first_by_class};
use super::markup::Element;
use super::ports::capabilities::ParticleCanvas;
use super::ports::Capabilities;
use super::record::FetchedRecord;
use super::schedule::{Deferred, TaskQueue};
use super::session::ReportError;
use super::slides::generator::{generate, GeneratedSlides, PostRender};
use super::slides::heatmap::CELL_CLASS;
use super::slides::shell::{self, GAME_SLIDE_ID};
use super::widgets::envelope::open_envelope;
use super::widgets::heatmap_tooltip::{revert_emphasis, show_tip};
use super::widgets::minigame::GameProgress;
use super::widgets::modal;
use super::widgets::particles::ParticleField;
use super::widgets::poster::{self, PosterComposer, PosterError};
use super::widgets::radar::RadarAdapter;

/// Dynamic slides go right after the gate.
pub const DYNAMIC_START: usize = GATE_INDEX + 1;
/// One rendering tick between appending slides and post-render work.
pub const POST_RENDER_DELAY: Duration = Duration::from_millis(100);

/// A user interaction, read from an element's `data-action` attribute.
/// `fetch` and `save-poster` are routed to the session instead.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    ShowHeatmapTip { month: u32 },
    ShowTag { name: String, desc: String },
    CloseTag,
    OpenEnvelope,
    OpenDataExplanation,
    CloseDataExplanation,
    OpenGame { index: usize },
    CloseGame,
    MakePoster,
    ClosePoster,
    OpenImageChoice,
    CloseImageChoice,
    TriggerUpload,
    OpenPhotoPicker,
    ClosePhotoPicker,
    PickPhoto { index: usize },
    Upload(Vec<u8>),
    CloseFinalResult,
}

impl UiAction {
    pub fn from_element(element: &Element) -> Option<Self> {
        let attr = |name: &str| element.get_attr(name);
        let index = || attr("data-index").and_then(|i| i.parse().ok());

        let action = match attr("data-action")? {
            "show-heatmap-tip" => UiAction::ShowHeatmapTip {
                month: attr("data-month")?.parse().ok()?,
            },
            "show-tag" => UiAction::ShowTag {
                name: attr("data-tag-name")?.to_string(),
                desc: attr("data-tag-desc").unwrap_or_default().to_string(),
            },
            "close-tag" => UiAction::CloseTag,
            "open-envelope" => UiAction::OpenEnvelope,
            "open-data-explanation" => UiAction::OpenDataExplanation,
            "close-data-explanation" => UiAction::CloseDataExplanation,
            "open-game" => UiAction::OpenGame { index: index()? },
            "close-game" => UiAction::CloseGame,
            "make-poster" => UiAction::MakePoster,
            "close-poster" => UiAction::ClosePoster,
            "open-img-choice" => UiAction::OpenImageChoice,
            "close-img-choice" => UiAction::CloseImageChoice,
            "trigger-upload" => UiAction::TriggerUpload,
            "open-photo-picker" => UiAction::OpenPhotoPicker,
            "close-photo-picker" => UiAction::ClosePhotoPicker,
            "pick-photo" => UiAction::PickPhoto { index: index()? },
            "close-final-result" => UiAction::CloseFinalResult,
            _ => return None,
        };
        Some(action)
    }
}

/// What the host has to do after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    Handled,
    Ignored,
    /// Open the file dialog for a poster photo.
    RequestUpload,
}

pub struct AppContext {
    carousel: Carousel,
    overlays: Element,
    record: Option<FetchedRecord>,
    tasks: TaskQueue,
    capabilities: Capabilities,
    rng: StdRng,
    dynamic_len: usize,
    pending_post: Option<PostRender>,
    nested_carousels: usize,
    radar: RadarAdapter,
    pending_partners: Option<Vec<String>>,
    constellation: Option<ParticleField>,
    poster: PosterComposer,
    game: GameProgress,
}

impl AppContext {
    pub fn new(capabilities: Capabilities) -> Self {
        Self::with_rng(capabilities, StdRng::from_entropy())
    }

    pub fn with_rng(capabilities: Capabilities, rng: StdRng) -> Self {
        let mut slides = shell::leading_slides();
        slides.extend(shell::tail_slides());
        let mut carousel = Carousel::new(slides);
        if let Some(first) = carousel.slide_mut(0) {
            animation::play(first);
        }

        Self {
            carousel,
            overlays: shell::overlays(),
            record: None,
            tasks: TaskQueue::new(),
            capabilities,
            rng,
            dynamic_len: 0,
            pending_post: None,
            nested_carousels: 0,
            radar: RadarAdapter::default(),
            pending_partners: None,
            constellation: None,
            poster: PosterComposer::default(),
            game: GameProgress::default(),
        }
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn carousel_mut(&mut self) -> &mut Carousel {
        &mut self.carousel
    }

    pub fn overlays(&self) -> &Element {
        &self.overlays
    }

    pub fn overlays_mut(&mut self) -> &mut Element {
        &mut self.overlays
    }

    pub fn record(&self) -> Option<&FetchedRecord> {
        self.record.as_ref()
    }

    pub fn has_record(&self) -> bool {
        self.record.is_some()
    }

    pub fn tasks(&self) -> &TaskQueue {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut TaskQueue {
        &mut self.tasks
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub fn dynamic_len(&self) -> usize {
        self.dynamic_len
    }

    pub fn nested_carousels(&self) -> usize {
        self.nested_carousels
    }

    pub fn radar(&self) -> &RadarAdapter {
        &self.radar
    }

    pub fn constellation(&self) -> Option<&ParticleField> {
        self.constellation.as_ref()
    }

    pub fn game(&self) -> &GameProgress {
        &self.game
    }

    pub fn poster(&self) -> &PosterComposer {
        &self.poster
    }

    /// The full page for the current deck.
    pub fn render_page(&self) -> String {
        shell::page(self.carousel.slides(), &self.overlays)
    }

    //
    // ──────────────────────────────────────────────────────────
    // Record and slides
    // ──────────────────────────────────────────────────────────
    //

    /// Stores the record and rebuilds the dynamic slides from it.
    pub fn set_record(&mut self, record: FetchedRecord) {
        let generated = generate(&record, &mut self.rng);
        self.record = Some(record);
        self.install_slides(generated);
    }

    /// Replaces the previously generated range with `generated` and schedules
    /// its post-render work.
    pub fn install_slides(&mut self, generated: GeneratedSlides) {
        self.carousel
            .remove_range(DYNAMIC_START..DYNAMIC_START + self.dynamic_len);
        self.dynamic_len = generated.slides.len();
        self.carousel.insert_slides(DYNAMIC_START, generated.slides);

        self.constellation = None;
        self.pending_partners = None;
        self.pending_post = Some(generated.post);
        self.tasks.schedule(POST_RENDER_DELAY, Deferred::PostRender);
    }

    fn run_post_render(&mut self) {
        let Some(post) = self.pending_post.take() else {
            return;
        };
        if let (Some(stats), Some(charts)) = (post.radar, &self.capabilities.charts) {
            self.radar.render(&**charts, &stats);
        }
        self.pending_partners = post.partner_names;
        self.nested_carousels = post.nested_carousels;
        debug!(
            nested = post.nested_carousels,
            constellation = self.pending_partners.is_some(),
            "post-render done"
        );
    }

    /// Draws one constellation frame. The particle field is created on the
    /// first frame, sized to the canvas.
    pub fn animation_frame(&mut self, canvas: &mut dyn ParticleCanvas) {
        if let Some(names) = self.pending_partners.take() {
            self.constellation = Some(ParticleField::new(&names, canvas.size(), &mut self.rng));
        }
        if let Some(field) = self.constellation.as_mut() {
            field.frame(canvas);
        }
    }

    //
    // ──────────────────────────────────────────────────────────
    // Deferred work
    // ──────────────────────────────────────────────────────────
    //

    /// Moves time forward and runs every task that came due.
    pub fn run_due(&mut self, elapsed: Duration) {
        for task in self.tasks.advance(elapsed) {
            self.run_task(task);
        }
    }

    fn run_task(&mut self, task: Deferred) {
        match task {
            Deferred::FillSkillBars { slide } => self.carousel.fill_skill_bars(slide),
            Deferred::RevertHeatmapEmphasis => {
                if let Some(slide) = self.slide_with_class_mut(CELL_CLASS) {
                    revert_emphasis(slide);
                }
            }
            Deferred::PostRender => self.run_post_render(),
            Deferred::AdvancePastGate => {
                let has_record = self.record.is_some();
                self.carousel.slide_next(has_record, &mut self.tasks);
            }
            Deferred::ShowGameCelebration => {
                if let Some(slide) = self.game_slide_mut() {
                    GameProgress::celebrate(slide);
                }
            }
            Deferred::HideTagModal => modal::hide_tag(&mut self.overlays),
        }
    }

    fn slide_index(&self, found: impl Fn(&Element) -> bool) -> Option<usize> {
        self.carousel.slides().iter().position(found)
    }

    fn slide_with_class_mut(&mut self, class: &str) -> Option<&mut Element> {
        let index = self.slide_index(|s| find_first_by_class(s, class).is_some())?;
        self.carousel.slide_mut(index)
    }

    fn game_slide_mut(&mut self) -> Option<&mut Element> {
        let index = self.slide_index(|s| find_by_id(s, GAME_SLIDE_ID).is_some())?;
        self.carousel.slide_mut(index)
    }

    //
    // ──────────────────────────────────────────────────────────
    // Actions
    // ──────────────────────────────────────────────────────────
    //

    fn stamp() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    pub fn handle(&mut self, action: UiAction) -> Result<UiEffect, ReportError> {
        let effect = match action {
            UiAction::ShowHeatmapTip { month } => {
                let index = self.slide_index(|s| find_first_by_class(s, CELL_CLASS).is_some());
                let shown = match index.and_then(|i| self.carousel.slide_mut(i)) {
                    Some(slide) => show_tip(slide, month, &mut self.tasks),
                    None => false,
                };
                if shown {
                    UiEffect::Handled
                } else {
                    UiEffect::Ignored
                }
            }
            UiAction::ShowTag { name, desc } => {
                modal::show_tag(&mut self.overlays, &name, &desc);
                UiEffect::Handled
            }
            UiAction::CloseTag => {
                modal::close_tag(&mut self.overlays, &mut self.tasks);
                UiEffect::Handled
            }
            UiAction::OpenEnvelope => {
                let capabilities = self.capabilities.clone();
                let opened = match self.slide_with_class_mut("envelope-wrapper") {
                    Some(slide) => open_envelope(slide, &capabilities),
                    None => false,
                };
                if opened {
                    UiEffect::Handled
                } else {
                    UiEffect::Ignored
                }
            }
            UiAction::OpenDataExplanation => {
                modal::open_data_explanation(&mut self.overlays);
                UiEffect::Handled
            }
            UiAction::CloseDataExplanation => {
                modal::close_data_explanation(&mut self.overlays);
                UiEffect::Handled
            }
            UiAction::OpenGame { index } => {
                let org = self.record.as_ref().and_then(FetchedRecord::org);
                if self.game.open_card(&mut self.overlays, index, org) {
                    UiEffect::Handled
                } else {
                    UiEffect::Ignored
                }
            }
            UiAction::CloseGame => {
                let index = self.slide_index(|s| find_by_id(s, GAME_SLIDE_ID).is_some());
                match index.and_then(|i| self.carousel.slide_mut(i)) {
                    Some(slide) => {
                        self.game.close_card(
                            slide,
                            &mut self.overlays,
                            &self.capabilities,
                            &mut self.tasks,
                        );
                        UiEffect::Handled
                    }
                    None => UiEffect::Ignored,
                }
            }
            UiAction::MakePoster => {
                match self
                    .poster
                    .open(&mut self.overlays, self.record.as_ref(), Self::stamp())
                {
                    Ok(()) => {}
                    Err(e) => self.capabilities.alert(&e.to_string()),
                }
                UiEffect::Handled
            }
            UiAction::ClosePoster => {
                PosterComposer::close(&mut self.overlays);
                UiEffect::Handled
            }
            UiAction::OpenImageChoice => {
                PosterComposer::open_image_choice(&mut self.overlays, self.record.as_ref())?;
                UiEffect::Handled
            }
            UiAction::CloseImageChoice => {
                poster::close_image_choice(&mut self.overlays);
                UiEffect::Handled
            }
            UiAction::TriggerUpload => UiEffect::RequestUpload,
            UiAction::OpenPhotoPicker => {
                PosterComposer::open_photo_picker(&mut self.overlays, self.record.as_ref())?;
                UiEffect::Handled
            }
            UiAction::ClosePhotoPicker => {
                poster::close_photo_picker(&mut self.overlays);
                UiEffect::Handled
            }
            UiAction::PickPhoto { index } => {
                let picked = self
                    .record
                    .as_ref()
                    .and_then(|r| r.activities().get(index))
                    .and_then(|act| Some((act.img.clone()?, act.title.clone())));
                match picked {
                    Some((url, title)) => {
                        self.poster.select_from_gallery(
                            &mut self.overlays,
                            &url,
                            Some(&title),
                            Self::stamp(),
                        );
                        poster::close_photo_picker(&mut self.overlays);
                        UiEffect::Handled
                    }
                    None => UiEffect::Ignored,
                }
            }
            UiAction::Upload(bytes) => {
                match self
                    .poster
                    .handle_upload(&mut self.overlays, &bytes, &self.capabilities)
                {
                    Ok(()) => UiEffect::Handled,
                    Err(e) => {
                        warn!(error = %e, size = bytes.len(), "poster upload rejected");
                        UiEffect::Ignored
                    }
                }
            }
            UiAction::CloseFinalResult => {
                poster::close_final_result(&mut self.overlays);
                UiEffect::Handled
            }
        };
        Ok(effect)
    }
}

impl From<PosterError> for ReportError {
    fn from(value: PosterError) -> Self {
        match value {
            PosterError::MissingGalleryData => ReportError::MissingGalleryData,
            PosterError::ExportFailed(_) => ReportError::ExportFailed,
            PosterError::MissingRecord | PosterError::UnsupportedImage => {
                ReportError::Validation
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::animation::SKILL_BAR_DELAY;
    use crate::presentation::carousel::NavGate;
    use crate::presentation::dom::{find_all_by_attr, find_all_by_class, find_by_id_mut};
    use crate::presentation::markup::el;
    use crate::presentation::record::{ActivityEntry, OrgRecord, TagEntry, UserRecord};
    use crate::presentation::slides::shell::GAME_CARD_COUNT;
    use crate::report::application::domain::entities::Category;

    fn context() -> AppContext {
        AppContext::with_rng(Capabilities::default(), StdRng::seed_from_u64(42))
    }

    fn overlay_control(ctx: &AppContext, action: &str) -> UiAction {
        let control = find_all_by_attr(ctx.overlays(), "data-action")
            .into_iter()
            .find(|e| e.get_attr("data-action") == Some(action))
            .unwrap_or_else(|| panic!("no {action} control"));
        UiAction::from_element(control).unwrap()
    }

    fn display(ctx: &AppContext, id: &str) -> Option<String> {
        find_by_id(ctx.overlays(), id).unwrap().style_prop("display")
    }

    fn clicked_tag(ctx: &AppContext, name: &str) -> UiAction {
        let chip = ctx
            .carousel()
            .slides()
            .iter()
            .flat_map(|s| find_all_by_class(s, "tag-item"))
            .find(|c| c.get_attr("data-tag-name") == Some(name))
            .unwrap();
        UiAction::from_element(chip).unwrap()
    }

    fn volunteer() -> FetchedRecord {
        FetchedRecord::Volunteer(UserRecord {
            is_volunteer: true,
            name: "林晓".into(),
            stats: Category::ALL.into_iter().zip([30.0, 12.0, 0.0, 4.0, 1.0]).collect(),
            activities: vec![
                ActivityEntry {
                    title: "周末课堂".into(),
                    date: "2024.03".into(),
                    img: Some("/media/images/a.jpg".into()),
                    hours: 4.0,
                    ..Default::default()
                },
                ActivityEntry {
                    title: "整理物资".into(),
                    date: "2024".into(),
                    ..Default::default()
                },
            ],
            co_volunteers: vec!["周一".into(), "王二".into()],
            tags: vec![TagEntry::Bare("筑梦".into())],
            ..Default::default()
        })
    }

    #[test]
    fn fresh_context_has_shell_and_tail_only() {
        let ctx = context();

        assert_eq!(ctx.carousel().len(), 4);
        assert!(!ctx.has_record());
        assert_eq!(ctx.dynamic_len(), 0);
    }

    #[test]
    fn regenerating_never_accumulates_slides() {
        // Arrange
        let mut ctx = context();

        // Act
        ctx.set_record(volunteer());
        let after_one = ctx.carousel().len();
        ctx.set_record(volunteer());
        ctx.set_record(volunteer());

        // Assert
        assert_eq!(after_one, 4 + 7);
        assert_eq!(ctx.carousel().len(), after_one);
        let last = ctx.carousel().slide(ctx.carousel().len() - 2).unwrap();
        assert_eq!(last.get_attr("id"), Some(GAME_SLIDE_ID));
    }

    #[test]
    fn switching_record_shape_replaces_the_range() {
        let mut ctx = context();
        ctx.set_record(volunteer());

        ctx.set_record(FetchedRecord::Organization(OrgRecord::default()));

        assert_eq!(ctx.carousel().len(), 4 + 3);
        assert_eq!(ctx.dynamic_len(), 3);
    }

    #[test]
    fn post_render_waits_one_tick_then_queues_constellation() {
        let mut ctx = context();
        ctx.set_record(volunteer());
        assert!(ctx.tasks().contains(&Deferred::PostRender));

        ctx.run_due(POST_RENDER_DELAY);

        assert_eq!(ctx.nested_carousels(), 1);
        assert!(ctx.tasks().is_empty());
    }

    #[test]
    fn heatmap_tip_and_revert_run_through_the_queue() {
        let mut ctx = context();
        ctx.set_record(volunteer());

        let effect = ctx.handle(UiAction::ShowHeatmapTip { month: 3 }).unwrap();

        assert_eq!(effect, UiEffect::Handled);
        ctx.run_due(Duration::from_millis(500));
        let slide = ctx
            .carousel()
            .slides()
            .iter()
            .find(|s| find_first_by_class(s, CELL_CLASS).is_some())
            .unwrap();
        assert_eq!(find_all_by_class(slide, "selected").len(), 1);
    }

    #[test]
    fn envelope_opens_once() {
        let mut ctx = context();
        ctx.set_record(volunteer());

        assert_eq!(ctx.handle(UiAction::OpenEnvelope).unwrap(), UiEffect::Handled);
        assert_eq!(ctx.handle(UiAction::OpenEnvelope).unwrap(), UiEffect::Ignored);
    }

    #[test]
    fn tag_chip_click_opens_modal_with_fallback_text() {
        let mut ctx = context();
        ctx.set_record(volunteer());
        let chip = ctx
            .carousel()
            .slides()
            .iter()
            .flat_map(|s| find_all_by_class(s, "tag-item"))
            .next()
            .cloned()
            .unwrap();

        let action = UiAction::from_element(&chip).unwrap();
        ctx.handle(action).unwrap();

        assert_eq!(
            find_by_id(ctx.overlays(), "tm-title").unwrap().text_content(),
            "筑梦"
        );
        assert_eq!(
            find_by_id(ctx.overlays(), "tm-content").unwrap().text_content(),
            "这是属于你的年度独特印记。"
        );
    }

    #[test]
    fn game_celebration_fires_after_all_cards() {
        let mut ctx = context();
        for index in 0..GAME_CARD_COUNT {
            ctx.handle(UiAction::OpenGame { index }).unwrap();
            ctx.handle(UiAction::CloseGame).unwrap();
        }

        ctx.run_due(Duration::from_millis(600));

        let slide = ctx
            .carousel()
            .slides()
            .iter()
            .find(|s| s.get_attr("id") == Some(GAME_SLIDE_ID))
            .unwrap();
        assert!(find_by_id(slide, "game-success-msg").unwrap().has_class("show"));
    }

    #[test]
    fn poster_picker_without_record_asks_for_upload() {
        let mut ctx = context();

        let result = ctx.handle(UiAction::OpenPhotoPicker);

        assert_eq!(result, Err(ReportError::MissingGalleryData));
    }

    #[test]
    fn picking_a_gallery_photo_marks_the_poster_replaced() {
        let mut ctx = context();
        ctx.set_record(volunteer());

        ctx.handle(UiAction::PickPhoto { index: 0 }).unwrap();
        assert_eq!(
            ctx.handle(UiAction::PickPhoto { index: 1 }).unwrap(),
            UiEffect::Ignored
        );

        assert!(ctx.poster().has_replaced_image());
    }

    #[test]
    fn gate_stays_locked_on_gate_slide_until_a_record_exists() {
        let mut ctx = context();
        let mut tasks = TaskQueue::new();
        ctx.carousel_mut().slide_next(false, &mut tasks);
        assert_eq!(ctx.carousel().gate(), NavGate::Locked);

        ctx.set_record(volunteer());
        ctx.carousel_mut().unlock();

        assert!(ctx.carousel_mut().slide_next(true, &mut tasks));
        assert_eq!(ctx.carousel().active_index(), DYNAMIC_START);
    }

    #[test]
    fn image_choice_controls_close_it_and_request_upload() {
        // Arrange
        let mut ctx = context();
        ctx.set_record(volunteer());
        ctx.handle(UiAction::OpenImageChoice).unwrap();
        assert_eq!(display(&ctx, "img-choice-overlay").as_deref(), Some("flex"));

        // Act
        let upload = overlay_control(&ctx, "trigger-upload");
        let close = overlay_control(&ctx, "close-img-choice");

        // Assert
        assert_eq!(upload, UiAction::TriggerUpload);
        assert_eq!(ctx.handle(upload).unwrap(), UiEffect::RequestUpload);
        assert_eq!(ctx.handle(close).unwrap(), UiEffect::Handled);
        assert_eq!(display(&ctx, "img-choice-overlay").as_deref(), Some("none"));
    }

    #[test]
    fn photo_picker_closes_from_its_own_control() {
        let mut ctx = context();
        ctx.set_record(volunteer());
        ctx.handle(UiAction::OpenPhotoPicker).unwrap();
        assert_eq!(display(&ctx, "photo-picker-overlay").as_deref(), Some("flex"));

        let close = overlay_control(&ctx, "close-photo-picker");
        ctx.handle(close).unwrap();

        assert_eq!(display(&ctx, "photo-picker-overlay").as_deref(), Some("none"));
    }

    #[test]
    fn final_result_closes_from_its_own_control() {
        let mut ctx = context();
        find_by_id_mut(ctx.overlays_mut(), "final-result-overlay")
            .unwrap()
            .add_class("show");

        let close = overlay_control(&ctx, "close-final-result");
        assert_eq!(close, UiAction::CloseFinalResult);
        ctx.handle(close).unwrap();

        assert!(!find_by_id(ctx.overlays(), "final-result-overlay")
            .unwrap()
            .has_class("show"));
    }

    #[test]
    fn named_tag_chip_opens_modal_with_its_own_description() {
        // Arrange
        let mut record = volunteer();
        if let FetchedRecord::Volunteer(user) = &mut record {
            user.tags = vec![
                TagEntry::Named {
                    name: "夜行者".into(),
                    desc: Some("深夜仍在奔波的你。".into()),
                },
                TagEntry::Named {
                    name: "守望者".into(),
                    desc: None,
                },
            ];
        }
        let mut ctx = context();
        ctx.set_record(record);

        // Act
        let action = clicked_tag(&ctx, "夜行者");
        ctx.handle(action).unwrap();

        // Assert
        assert_eq!(
            find_by_id(ctx.overlays(), "tm-title").unwrap().text_content(),
            "夜行者"
        );
        assert_eq!(
            find_by_id(ctx.overlays(), "tm-content").unwrap().text_content(),
            "深夜仍在奔波的你。"
        );

        let action = clicked_tag(&ctx, "守望者");
        ctx.handle(action).unwrap();
        assert_eq!(
            find_by_id(ctx.overlays(), "tm-content").unwrap().text_content(),
            "这是属于你的年度独特印记。"
        );
    }

    #[test]
    fn skill_bar_fill_scheduled_before_regeneration_skips_the_new_slide() {
        // Arrange
        let mut ctx = context();
        ctx.set_record(volunteer());
        let stale = ctx.carousel().key_at(DYNAMIC_START).unwrap();
        ctx.tasks_mut()
            .schedule(SKILL_BAR_DELAY, Deferred::FillSkillBars { slide: stale });

        // Act
        ctx.set_record(volunteer());
        ctx.run_due(SKILL_BAR_DELAY);

        // Assert
        let bar_width = |ctx: &AppContext| {
            let slide = ctx.carousel().slide(DYNAMIC_START).unwrap();
            let bar = find_first_by_class(slide, "skill-fill").unwrap();
            (bar.style_prop("width"), bar.get_attr("data-width").map(str::to_string))
        };
        assert_eq!(bar_width(&ctx).0.as_deref(), Some("0"));

        let fresh = ctx.carousel().key_at(DYNAMIC_START).unwrap();
        assert_ne!(fresh, stale);
        ctx.tasks_mut()
            .schedule(SKILL_BAR_DELAY, Deferred::FillSkillBars { slide: fresh });
        ctx.run_due(SKILL_BAR_DELAY);
        let (width, target) = bar_width(&ctx);
        assert_eq!(width, target);
    }

    #[test]
    fn unknown_actions_are_not_parsed() {
        assert_eq!(UiAction::from_element(&el("div").attr("data-action", "fetch")), None);
        assert_eq!(
            UiAction::from_element(&el("div").attr("data-action", "open-game").attr("data-index", "2")),
            Some(UiAction::OpenGame { index: 2 })
        );
    }
}
