/// Build the image prompt for a team.
///
/// The crowd mosaic must recreate the face from the uploaded photo in the
/// team's colours.
pub fn tifo_prompt(team_name: &str) -> String {
    format!(
        "A high-quality wide-angle cinematic shot of a professional football stadium \
         packed with thousands of fans. In the main grandstand, the supporters are holding \
         up colored panels to form a massive mosaic (tifo). The tifo MUST feature a faithful \
         recreation of the face from the provided image, integrated with the colors and \
         identity of {}. Ultra-realistic, 8k resolution.",
        team_name
    )
}
