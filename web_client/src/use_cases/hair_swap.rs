use crate::domain::ports::{
    HairSwapError, HairSwapRequest, HairSwapper, ImageUpload, SwappedImage,
};

// Form fields as they arrived; any of them may be missing.
#[derive(Debug, Default)]
pub struct HairSwapForm {
    pub hair_style_url: Option<String>,
    pub hair_color_url: Option<String>,
    pub image: Option<ImageUpload>,
}

#[derive(Debug)]
pub enum HairSwapFailure {
    // Wire names of the missing fields, in form order.
    MissingFields(Vec<&'static str>),
    Upstream(HairSwapError),
}

pub struct HairSwapUseCase<H> {
    pub swapper: H,
}

impl<H> HairSwapUseCase<H>
where
    H: HairSwapper,
{
    pub async fn execute(&self, form: HairSwapForm) -> Result<SwappedImage, HairSwapFailure> {
        let request = validate(form)?;
        self.swapper
            .swap(request)
            .await
            .map_err(HairSwapFailure::Upstream)
    }
}

fn validate(form: HairSwapForm) -> Result<HairSwapRequest, HairSwapFailure> {
    let hair_style_url = non_empty(form.hair_style_url);
    let hair_color_url = non_empty(form.hair_color_url);
    let image = form.image.filter(|image| !image.bytes.is_empty());

    match (hair_style_url, hair_color_url, image) {
        (Some(hair_style_url), Some(hair_color_url), Some(image)) => Ok(HairSwapRequest {
            hair_style_url,
            hair_color_url,
            image,
        }),
        (hair_style_url, hair_color_url, image) => {
            let mut missing = Vec::new();
            if hair_style_url.is_none() {
                missing.push("hairStyleUrl");
            }
            if hair_color_url.is_none() {
                missing.push("hairColorUrl");
            }
            if image.is_none() {
                missing.push("image");
            }
            Err(HairSwapFailure::MissingFields(missing))
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
