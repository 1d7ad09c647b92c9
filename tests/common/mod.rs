#![allow(dead_code)]

use std::{io::Cursor, path::Path, sync::Mutex, time::Duration};

use async_trait::async_trait;
use reframe_news::{
    llm::{ChatRequest, ImageRequest, ImageService, TextService},
    ServiceError, Settings,
};

/// Text service answering from a closure over the user message.
pub struct StubText {
    respond: Box<dyn Fn(&str) -> Result<String, ServiceError> + Send + Sync>,
    pub requests: Mutex<Vec<ChatRequest>>,
    /// Delay applied to the n-th call, shrinking with each call.
    pub stagger: Option<Duration>,
}

impl StubText {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&str) -> Result<String, ServiceError> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            requests: Mutex::new(Vec::new()),
            stagger: None,
        }
    }

    pub fn fixed(reply: &'static str) -> Self {
        Self::new(move |_| Ok(reply.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl TextService for StubText {
    async fn complete(&self, request: &ChatRequest) -> Result<String, ServiceError> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };
        if let Some(step) = self.stagger {
            let remaining = 10u32.saturating_sub(call as u32);
            tokio::time::sleep(step * remaining).await;
        }
        let user = request
            .messages
            .iter()
            .find(|m| m.role == "user")
            .map(|m| m.content.clone())
            .unwrap_or_default();
        (self.respond)(&user)
    }
}

pub enum ImageBehaviour {
    Png { width: u32, height: u32 },
    GenerateFails,
    DownloadStatus(u16),
    DownloadUnreachable,
    Garbage,
}

pub struct StubImages {
    pub behaviour: ImageBehaviour,
    pub prompts: Mutex<Vec<String>>,
}

impl StubImages {
    pub fn png(width: u32, height: u32) -> Self {
        Self::with(ImageBehaviour::Png { width, height })
    }

    pub fn with(behaviour: ImageBehaviour) -> Self {
        Self {
            behaviour,
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ImageService for StubImages {
    async fn generate(&self, request: &ImageRequest) -> Result<String, ServiceError> {
        assert_eq!(request.n, 1);
        self.prompts.lock().unwrap().push(request.prompt.clone());
        match self.behaviour {
            ImageBehaviour::GenerateFails => Err(ServiceError::Api {
                status: 400,
                message: "Your request was rejected by the safety system".into(),
            }),
            _ => Ok("https://images.example.test/generated.png".into()),
        }
    }

    async fn download(&self, _url: &str) -> Result<Vec<u8>, ServiceError> {
        match self.behaviour {
            ImageBehaviour::Png { width, height } => Ok(png_bytes(width, height)),
            ImageBehaviour::DownloadStatus(status) => Err(ServiceError::Status(status)),
            ImageBehaviour::DownloadUnreachable => Err(ServiceError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
            ImageBehaviour::Garbage => Ok(b"not an image".to_vec()),
            ImageBehaviour::GenerateFails => unreachable!("download after failed generation"),
        }
    }
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([220, 140, 30]));
    let mut buf = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

pub fn write_input(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

pub fn settings_in(dir: &Path, input: &Path) -> Settings {
    let mut settings = Settings::offline(input, dir.join("out.csv"));
    settings.image_dir = dir.join("img_reframe");
    settings
}
