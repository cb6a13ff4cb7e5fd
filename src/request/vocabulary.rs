//! Controlled vocabulary for `image_tags`.
//!
//! The table here is the single source of the tag names and their
//! descriptions; the instruction text is rendered from it.

use std::fmt;
use std::str::FromStr;

/// Whether a tag describes the cat or the photograph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagGroup {
    /// Pose and behavior of the cat
    Pose,
    /// Camera angle, focus and shot distance
    Composition,
}

/// Section of the vocabulary a tag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagCategory {
    Sitting,
    Standing,
    Lying,
    Moving,
    Behavior,
    Angle,
    Focus,
    Distance,
}

impl TagCategory {
    /// Every category, in prompt order.
    pub const ALL: [TagCategory; 8] = [
        TagCategory::Sitting,
        TagCategory::Standing,
        TagCategory::Lying,
        TagCategory::Moving,
        TagCategory::Behavior,
        TagCategory::Angle,
        TagCategory::Focus,
        TagCategory::Distance,
    ];

    pub fn group(self) -> TagGroup {
        match self {
            TagCategory::Sitting
            | TagCategory::Standing
            | TagCategory::Lying
            | TagCategory::Moving
            | TagCategory::Behavior => TagGroup::Pose,
            TagCategory::Angle | TagCategory::Focus | TagCategory::Distance => {
                TagGroup::Composition
            }
        }
    }

    /// Section heading used in the instruction text.
    pub fn heading(self) -> &'static str {
        match self {
            TagCategory::Sitting => "앉은 자세",
            TagCategory::Standing => "서 있는 자세",
            TagCategory::Lying => "누워 있는 자세",
            TagCategory::Moving => "움직이는 자세",
            TagCategory::Behavior => "특정 행동 자세",
            TagCategory::Angle => "앵글",
            TagCategory::Focus => "초점",
            TagCategory::Distance => "촬영 거리",
        }
    }

    /// Tags in this category, in vocabulary order.
    pub fn tags(self) -> impl Iterator<Item = ImageTag> {
        ImageTag::ALL
            .iter()
            .copied()
            .filter(move |tag| tag.category() == self)
    }
}

macro_rules! image_tags {
    ($($variant:ident => ($wire:literal, $category:ident, $description:literal),)+) => {
        /// A tag from the controlled vocabulary.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ImageTag {
            $($variant,)+
        }

        impl ImageTag {
            /// Every tag, in vocabulary order.
            pub const ALL: &'static [ImageTag] = &[$(ImageTag::$variant,)+];

            /// Wire name, as it appears in `image_tags`.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(ImageTag::$variant => $wire,)+
                }
            }

            pub fn category(self) -> TagCategory {
                match self {
                    $(ImageTag::$variant => TagCategory::$category,)+
                }
            }

            /// Classification rule given to the provider for this tag.
            pub fn description(self) -> &'static str {
                match self {
                    $(ImageTag::$variant => $description,)+
                }
            }
        }

        impl FromStr for ImageTag {
            type Err = UnknownTag;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(ImageTag::$variant),)+
                    other => Err(UnknownTag(other.to_string())),
                }
            }
        }
    };
}

image_tags! {
    Sit => ("SIT", Sitting, "앞다리를 가지런히 모으고 앉아있는 자세"),
    BreadSit => ("BREAD_SIT", Sitting, "앞다리를 몸통 아래에 숨기고 웅크린 자세"),
    SpinksSit => ("SPINKS_SIT", Sitting, "엎드린 채 앞다리를 앞으로 뻗은 자세"),
    SideSit => ("SIDE_SIT", Sitting, "몸을 옆으로 기울여 앉아있는 자세"),
    Stand => ("STAND", Standing, "네 다리로 바닥을 딛고 서 있는 자세"),
    BoundStand => ("BOUND_STAND", Standing, "몸을 살짝 숙이거나 다리를 모으고 주변을 살피는 자세"),
    BackStand => ("BACK_STAND", Standing, "뒷다리로만 서서 앞다리를 들고 있는 자세"),
    Lie => ("LIE", Lying, "배를 바닥에 대고 엎드려 있는 자세"),
    SideLie => ("SIDE_LIE", Lying, "몸을 옆으로 쭉 뻗고 누워있는 자세"),
    BallLie => ("BALL_LIE", Lying, "배를 위로 향하게 하고 누워있는 자세"),
    CurlLie => ("CURL_LIE", Lying, "몸을 둥글게 말고 자는 자세"),
    Walking => ("WALKING", Moving, "네 다리를 움직이며 걷는 자세"),
    Running => ("RUNNING", Moving, "공중에 떠 있는 듯한 달리는 자세"),
    Jumping => ("JUMPING", Moving, "뛰어오르는 순간의 자세"),
    Hunting => ("HUNTING", Moving, "몸을 낮추고 먹잇감을 노리는 자세"),
    Grooming => ("GROOMING", Behavior, "혀로 털을 핥는 자세"),
    Sniff => ("SNIFF", Behavior, "입을 크게 벌리고 하품하는 자세"),
    Stretch => ("STRETCH", Behavior, "몸을 쭉 뻗는 자세"),
    Play => ("PLAY", Behavior, "장난감을 잡거나 쫓는 자세"),
    FrontAngle => ("FRONT_ANGLE", Angle, "고양이의 정면을 향해 촬영"),
    SideAngle => ("SIDE_ANGLE", Angle, "고양이의 옆모습 촬영"),
    BackAngle => ("BACK_ANGLE", Angle, "고양이의 뒷모습 촬영"),
    TopView => ("TOP_VIEW", Angle, "위에서 내려다보며 촬영"),
    LowAngle => ("LOW_ANGLE", Angle, "아래에서 올려다보며 촬영"),
    FaceFocus => ("FACE_FOCUS", Focus, "고양이 얼굴에 초점"),
    BodyFocus => ("BODY_FOCUS", Focus, "고양이 전체 모습에 초점"),
    PartFocus => ("PART_FOCUS", Focus, "눈이나 발 등 특정 부위에 초점"),
    CloseUp => ("CLOSE_UP", Distance, "얼굴이나 특정 부위를 아주 가깝게 촬영"),
    MidShot => ("MID_SHOT", Distance, "상반신이나 전신 일부를 포함한 촬영"),
    FullShot => ("FULL_SHOT", Distance, "전신과 주변 환경을 모두 포함한 촬영"),
}

impl ImageTag {
    pub fn group(self) -> TagGroup {
        self.category().group()
    }
}

impl fmt::Display for ImageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tag string outside the controlled vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown image tag `{0}`")]
pub struct UnknownTag(pub String);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_vocabulary_size_and_uniqueness() {
        assert_eq!(ImageTag::ALL.len(), 30);
        let names: HashSet<_> = ImageTag::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(names.len(), ImageTag::ALL.len());
    }

    #[test]
    fn test_wire_names_round_trip() {
        for tag in ImageTag::ALL {
            assert_eq!(tag.as_str().parse::<ImageTag>(), Ok(*tag));
        }
    }

    #[test]
    fn test_unknown_tag() {
        assert_eq!(
            "YAWNING".parse::<ImageTag>(),
            Err(UnknownTag("YAWNING".to_string()))
        );
        // wire names are case-sensitive
        let err = "sit".parse::<ImageTag>().unwrap_err();
        assert_eq!(err.to_string(), "unknown image tag `sit`");
    }

    #[test]
    fn test_categories_partition_vocabulary() {
        let total: usize = TagCategory::ALL.iter().map(|c| c.tags().count()).sum();
        assert_eq!(total, ImageTag::ALL.len());
        assert_eq!(TagCategory::Sitting.tags().count(), 4);
        assert_eq!(TagCategory::Angle.tags().count(), 5);
    }

    #[test]
    fn test_groups() {
        assert_eq!(ImageTag::Grooming.group(), TagGroup::Pose);
        assert_eq!(ImageTag::FullShot.group(), TagGroup::Composition);
        assert_eq!(ImageTag::TopView.category(), TagCategory::Angle);
    }
}
