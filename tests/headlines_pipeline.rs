mod common;

use common::{settings_in, write_input, ImageBehaviour, StubImages, StubText};
use reframe_news::{
    data,
    pipeline::{self, HeadlineColumns},
    Emotion, FailureKind, ServiceError,
};

const HEADLINES: &str = "id;title\n1;Markets Rally\n2;Storm Hits Coast\n";

#[tokio::test]
async fn hopeful_headlines_and_images_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "reframed_title_txt.csv", HEADLINES);
    let mut settings = settings_in(dir.path(), &input);
    settings.emotions = vec![Emotion::Hopeful];
    let text = StubText::fixed("Markets Soar!");
    let images = StubImages::png(512, 512);

    let report = pipeline::run_headlines(&settings, &HeadlineColumns::default(), &text, &images)
        .await
        .unwrap();

    let table = data::load_table(&settings.output_path, "title").unwrap();
    assert_eq!(table.headers(), ["id", "title", "hopeful_title", "hopeful_img"]);
    assert_eq!(table.cell(0, "hopeful_title"), Some("Markets Soar!"));

    let saved = settings.image_dir.join("1_hopeful.png");
    assert!(saved.exists());
    assert_eq!(table.cell(0, "hopeful_img"), Some(saved.display().to_string().as_str()));
    assert!(settings.image_dir.join("2_hopeful.png").exists());

    let decoded = image::open(&saved).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (512, 512));
    assert_eq!(report.failed(), 0);
    assert_eq!(report.cells, 4);
}

#[tokio::test]
async fn image_prompt_uses_reframed_title() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = settings_in(dir.path(), &dir.path().join("unused.csv"));
    settings.emotions = vec![Emotion::Angry];
    let mut table = data::reader::load_from_reader(HEADLINES.as_bytes(), "title").unwrap();
    let text = StubText::new(|title| Ok(format!("\"{title}\" is an outrage")));
    let images = StubImages::png(8, 8);

    pipeline::process_headlines(&mut table, &settings, &HeadlineColumns::default(), &text, &images)
        .await
        .unwrap();

    let prompts = images.prompts.lock().unwrap();
    assert_eq!(
        prompts[0],
        "A visually compelling representation of an angry sentiment based on the headline: Markets Rally is an outrage."
    );
    assert_eq!(text.requests.lock().unwrap()[0].max_tokens, 50);
}

#[tokio::test]
async fn failed_reframe_falls_back_to_source_title_for_image() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = settings_in(dir.path(), &dir.path().join("unused.csv"));
    settings.emotions = vec![Emotion::Fearful];
    let mut table = data::reader::load_from_reader(HEADLINES.as_bytes(), "title").unwrap();
    let text = StubText::new(|_| Err(ServiceError::Malformed("response carried no choices".into())));
    let images = StubImages::png(8, 8);

    pipeline::process_headlines(&mut table, &settings, &HeadlineColumns::default(), &text, &images)
        .await
        .unwrap();

    let titles = table.column("fearful_title").unwrap();
    assert!(titles.iter().all(|t| t.starts_with("Failed to reframe")));
    assert!(images.prompts.lock().unwrap()[1].ends_with("headline: Storm Hits Coast."));
    assert!(settings.image_dir.join("2_fearful.png").exists());
}

#[tokio::test]
async fn download_status_becomes_marker() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = settings_in(dir.path(), &dir.path().join("unused.csv"));
    settings.emotions = vec![Emotion::Angry, Emotion::Hopeful];
    let mut table = data::reader::load_from_reader(HEADLINES.as_bytes(), "title").unwrap();
    let text = StubText::fixed("Headline");
    let images = StubImages::with(ImageBehaviour::DownloadStatus(403));

    let report = pipeline::process_headlines(
        &mut table,
        &settings,
        &HeadlineColumns::default(),
        &text,
        &images,
    )
    .await
    .unwrap();

    for column in ["angry_img", "hopeful_img"] {
        for value in table.column(column).unwrap() {
            assert_eq!(value, "Failed to download image: HTTP 403");
        }
    }
    assert_eq!(table.column("hopeful_title").unwrap(), vec!["Headline", "Headline"]);
    assert_eq!(report.failures_by_kind.get(&FailureKind::DownloadImage), Some(&4));
}

#[tokio::test]
async fn unreachable_download_counts_as_generation_failure() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = settings_in(dir.path(), &dir.path().join("unused.csv"));
    settings.emotions = vec![Emotion::Fearful];
    let mut table = data::reader::load_from_reader(HEADLINES.as_bytes(), "title").unwrap();
    let images = StubImages::with(ImageBehaviour::DownloadUnreachable);

    let report = pipeline::process_headlines(
        &mut table,
        &settings,
        &HeadlineColumns::default(),
        &StubText::fixed("Storm fears grow"),
        &images,
    )
    .await
    .unwrap();

    for value in table.column("fearful_img").unwrap() {
        assert_eq!(value, "Failed to generate image: connection refused");
    }
    assert_eq!(report.failures_by_kind.get(&FailureKind::GenerateImage), Some(&2));
    assert!(report.failures_by_kind.get(&FailureKind::DownloadImage).is_none());
}

#[tokio::test]
async fn generation_and_decode_failures_become_markers() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = settings_in(dir.path(), &dir.path().join("unused.csv"));
    settings.emotions = vec![Emotion::Angry];

    let mut table = data::reader::load_from_reader(HEADLINES.as_bytes(), "title").unwrap();
    let images = StubImages::with(ImageBehaviour::GenerateFails);
    pipeline::process_headlines(
        &mut table,
        &settings,
        &HeadlineColumns::default(),
        &StubText::fixed("x"),
        &images,
    )
    .await
    .unwrap();
    let cell = table.cell(0, "angry_img").unwrap();
    assert!(cell.starts_with("Failed to generate image"));
    assert!(cell.contains("safety system"));

    let mut table = data::reader::load_from_reader(HEADLINES.as_bytes(), "title").unwrap();
    let images = StubImages::with(ImageBehaviour::Garbage);
    let report = pipeline::process_headlines(
        &mut table,
        &settings,
        &HeadlineColumns::default(),
        &StubText::fixed("x"),
        &images,
    )
    .await
    .unwrap();
    assert!(table
        .cell(1, "angry_img")
        .unwrap()
        .starts_with("Failed to generate image"));
    assert_eq!(report.failures_by_kind.get(&FailureKind::SaveImage), Some(&2));
    assert!(!settings.image_dir.join("1_angry.png").exists());
}

#[tokio::test]
async fn missing_id_column_is_fatal_before_any_call() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "in.csv", "title;source\nMarkets Rally;wire\n");
    let settings = settings_in(dir.path(), &input);
    let text = StubText::fixed("x");
    let images = StubImages::png(8, 8);

    let err = pipeline::run_headlines(&settings, &HeadlineColumns::default(), &text, &images)
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("`id`"));
    assert_eq!(text.calls(), 0);
    assert!(!settings.output_path.exists());
}

#[tokio::test]
async fn report_serializes_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = settings_in(dir.path(), &dir.path().join("unused.csv"));
    settings.emotions = vec![Emotion::Hopeful];
    let mut table = data::reader::load_from_reader(HEADLINES.as_bytes(), "title").unwrap();
    let images = StubImages::with(ImageBehaviour::DownloadStatus(500));

    let report = pipeline::process_headlines(
        &mut table,
        &settings,
        &HeadlineColumns::default(),
        &StubText::fixed("Brighter days"),
        &images,
    )
    .await
    .unwrap();
    let path = dir.path().join("reports/run.json");
    report.save(&path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["pipeline"], "headlines");
    assert_eq!(json["failures_by_kind"]["download_image"], 2);
    assert_eq!(json["failures"][0]["column"], "hopeful_img");
    assert!(json["finished_at"].is_string());
}
