//! Instruction text sent to the provider.

use std::fmt::Write;

use super::vocabulary::{TagCategory, TagGroup};

/// Per-call user instruction appended after the image.
pub const USER_INSTRUCTION: &str = "사진을 보고 응답 스키마에 따라 응답을 줘";

const REQUIREMENTS: &str = "\
# 요구사항
1. 사진에 고양이가 있는지를 판단해서 is_cat 필드에 true 또는 false를 반환합니다.
  고양이가 여러마리 있는 경우에는 true를 반환합니다.
2. 고양이 자세 판별 기준에 따라 고양이 자세를 분류하고 image_tags 필드에 태그를 부여합니다.
  태그는 중복으로 부여할 수 있습니다.
  고양이가 여러마리 있는 경우에는 가장 큰 고양이를 기준으로 합니다.
기대하는 응답 ex) \"SIT\", \"FRONT_ANGLE\", \"FACE_FOCUS\", \"FULL_SHOT\"
3. 고양이 색상을 분류하고 color_codes 필드에 색상 코드를 부여합니다. 색상 코드는 중복으로 부여할 수 있습니다.
  고양이가 여러마리 있는 경우에는 가장 큰 고양이를 기준으로 합니다.
기대하는 응답 ex) \"#000000\", \"#FFFFFF\", \"#FF0000\"
4. 고양이 종류를 분류하고 breed_type 필드에 종류를 부여합니다.
  고양이가 여러마리 있는 경우에는 가장 큰 고양이를 기준으로 합니다.
기대하는 응답 ex) \"러시안블루\", \"브리티시쇼트헤어\", \"랙돌\", \"랙돌\"
5. 고양이 나이를 분류하고 age 필드에 나이(개월수)를 부여합니다.
  고양이가 여러마리 있는 경우에는 가장 큰 고양이를 기준으로 합니다.
기대하는 응답 ex) 2, 4, 12, 45
";

/// Render the system instruction: the tag rules for every category followed
/// by the output requirements.
pub fn system_instruction() -> String {
    let mut out = String::from("# 고양이 자세 판별 기준\n\n");

    for (group_idx, group) in [TagGroup::Pose, TagGroup::Composition]
        .into_iter()
        .enumerate()
    {
        let title = match group {
            TagGroup::Pose => "기본 자세 분류",
            TagGroup::Composition => "촬영 구도",
        };
        // writing into a String cannot fail
        let _ = writeln!(out, "## {}. {}\n", group_idx + 1, title);

        let categories = TagCategory::ALL.into_iter().filter(|c| c.group() == group);
        for (section_idx, category) in categories.enumerate() {
            let _ = writeln!(
                out,
                "### {}.{} {}",
                group_idx + 1,
                section_idx + 1,
                category.heading()
            );
            for tag in category.tags() {
                let _ = writeln!(out, "- **{}**: {}", tag.as_str(), tag.description());
            }
            out.push('\n');
        }
    }

    out.push_str(REQUIREMENTS);
    out
}
