use crate::request::{
    CreativeBrief, EmailFollowUpType, EventType, GenerationRequest,
    McScriptType, OutputTone, PlaylistType, RefinementRequest,
    SalesObjectionType, SocialMediaPlatform, Template, TemplateRequest,
};

/// Build the single prompt string for a request. Deterministic, no I/O.
pub fn build_prompt(request: &GenerationRequest) -> String {
    match request {
        GenerationRequest::Refinement(refinement) => refine(refinement),
        GenerationRequest::Template(template) => generate(template),
    }
}

/// True exactly when the request should run with provider-side web search
/// grounding: the blog-post creative sub-kind.
pub fn wants_web_grounding(request: &GenerationRequest) -> bool {
    matches!(
        request,
        GenerationRequest::Template(TemplateRequest {
            template: Template::CreativeContent {
                brief: CreativeBrief::BlogPost { .. },
            },
            ..
        })
    )
}

fn refine(request: &RefinementRequest) -> String {
    format!(
        "You are an expert text editor for a professional DJ. Your task is to refine the following text.\n\
         \n\
         Refinement instruction: \"{action}\"\n\
         \n\
         Original Text:\n\
         ---\n\
         {original}\n\
         ---\n\
         \n\
         Produce only the refined text as the output. Do not add any extra commentary.",
        action = request.refinement_action,
        original = request.original_text,
    )
}

fn generate(request: &TemplateRequest) -> String {
    let event_type = request.event_type;
    let tone = request.tone;
    let brand_voice = brand_voice_instruction(request.brand_voice.as_deref());
    let base = base_instruction(tone, &brand_voice);

    match &request.template {
        Template::Agreement {
            client_name,
            dj_name,
            event_date,
            venue,
            total_cost,
            deposit_amount,
        } => agreement(
            &base,
            event_type,
            field(dj_name, "[DJ Name/Company]"),
            field(client_name, "[Client Name(s)]"),
            field(event_date, "[Event Date]"),
            field(venue, "[Venue Name & Address]"),
            field(total_cost, "[Total Cost]"),
            field(deposit_amount, "[Deposit Amount]"),
        ),
        Template::DepositTerms {
            total_cost,
            deposit_amount,
            deposit_due_date,
            payment_methods,
        } => deposit_terms(
            &base,
            event_type,
            field(total_cost, "[Total Cost]"),
            field(deposit_amount, "[Deposit Amount]"),
            field(deposit_due_date, "[Deposit Due Date]"),
            field(payment_methods, "[List of Payment Methods]"),
        ),
        Template::EmailFollowUp {
            follow_up_type,
            dj_name,
            client_name,
            event_date,
        } => email_follow_up(
            &base,
            event_type,
            *follow_up_type,
            field(dj_name, "[DJ Name]"),
            field(client_name, "[Client Name]"),
            field(event_date, "[Event Date]"),
        ),
        Template::CreativeContent { brief } => {
            creative(brief, event_type, tone, &brand_voice)
        }
        Template::MusicPlaylists {
            playlist_type,
            client_name,
            genre_vibe,
            must_play_songs,
            do_not_play_songs,
        } => music_playlists(
            event_type,
            *playlist_type,
            field(client_name, "[Client Name]"),
            client_name.as_deref().unwrap_or("the Event"),
            field(genre_vibe, "DJ's choice"),
            field(must_play_songs, "None specified"),
            field(do_not_play_songs, "None specified"),
        ),
        Template::SalesAssistant {
            objection,
            dj_name,
            client_name,
            total_cost,
        } => sales_assistant(
            tone,
            &brand_voice,
            *objection,
            field(dj_name, "[Your Name/Company]"),
            field(client_name, "[Client Name]"),
            field(total_cost, "[Your Price]"),
        ),
        Template::EventChecklist => event_checklist(&base, event_type),
        Template::PreEventQuestionnaire => {
            pre_event_questionnaire(&base, event_type)
        }
        Template::PostEventQuestionnaire => {
            post_event_questionnaire(&base, event_type)
        }
        Template::EventTimeline {
            client_name,
            event_date,
            event_start_time,
            event_end_time,
        } => event_timeline(
            &base,
            event_type,
            field(client_name, "[Client Name]"),
            field(event_date, "[Event Date]"),
            field(event_start_time, "[Start Time]"),
            field(event_end_time, "[End Time]"),
        ),
    }
}

fn field<'a>(value: &'a Option<String>, placeholder: &'a str) -> &'a str {
    match value.as_deref() {
        Some(value) if !value.trim().is_empty() => value,
        _ => placeholder,
    }
}

fn brand_voice_instruction(brand_voice: Option<&str>) -> String {
    match brand_voice {
        Some(voice) if !voice.trim().is_empty() => format!(
            "Adapt your writing style to match the DJ's brand voice: \"{voice}\"."
        ),
        _ => String::new(),
    }
}

fn base_instruction(tone: OutputTone, brand_voice: &str) -> String {
    format!(
        "You are a world-class business consultant for professional DJs. \
         Your task is to generate a well-structured, professional, and clear document. \
         The tone should be {tone}. The output should be plain text, ready to be copied. {brand_voice}"
    )
}

// Questionnaire-style templates carry this so the output can be converted
// into a form; the export path downstream keys off the bracketed types.
static FORM_FORMATTING_INSTRUCTION: &str = "IMPORTANT: Structure the output for easy conversion into a Google Form. \
     For each question or checklist item, specify the suggested question type in brackets, \
     like [Short Answer], [Paragraph], [Multiple Choice], [Checkboxes], or [Linear Scale 1-5]. \
     Start each item on a new line.";

#[allow(clippy::too_many_arguments)]
fn agreement(
    base: &str,
    event_type: EventType,
    dj_name: &str,
    client_name: &str,
    event_date: &str,
    venue: &str,
    total_cost: &str,
    deposit_amount: &str,
) -> String {
    format!(
        "{base}\n\
         \n\
         Generate a comprehensive DJ service agreement for a {event_type}.\n\
         \n\
         Details:\n\
         - Parties Involved: {dj_name} (Hereinafter \"DJ\") and {client_name} (Hereinafter \"Client\").\n\
         - Event Type: {event_type}\n\
         - Event Date: {event_date}\n\
         - Venue: {venue}\n\
         - Service Period: [Specify Start and End Times, e.g., 6:00 PM to 11:00 PM]\n\
         - Total Fee: ${total_cost}\n\
         - Deposit: ${deposit_amount} required to secure the date.\n\
         - Final Balance Due: [Specify Date, e.g., 14 days prior to the event]\n\
         \n\
         The agreement must include the following sections, clearly titled:\n\
         1.  **Parties**: Defines the DJ and Client.\n\
         2.  **Event Details**: Summarizes date, time, and location.\n\
         3.  **Services Provided**: Details the DJ/MC services, equipment provided (sound system, microphones, basic lighting).\n\
         4.  **Payment Schedule**: Outlines total fee, deposit amount and due date, and final balance due date.\n\
         5.  **Cancellation Policy**: Clear terms for cancellation by either the Client or the DJ.\n\
         6.  **Overtime**: Specifies the hourly rate for services extending beyond the agreed time.\n\
         7.  **DJ Requirements**: Client's responsibility to provide adequate power, a safe working environment, and protection from elements if outdoors.\n\
         8.  **Music & Planning**: Mentions the process for music requests and planning.\n\
         9.  **Liability & Indemnification**: Standard limitation of liability clause.\n\
         10. **Model Release**: A clause allowing the DJ to use photos/videos from the event for promotional purposes (optional, but good to include).\n\
         11. **Entire Agreement**: Standard clause stating this document is the entire agreement.\n\
         12. **Signatures**: Lines for both DJ and Client signatures and dates."
    )
}

fn deposit_terms(
    base: &str,
    event_type: EventType,
    total_cost: &str,
    deposit_amount: &str,
    deposit_due_date: &str,
    payment_methods: &str,
) -> String {
    format!(
        "{base}\n\
         \n\
         Generate a clear and concise \"Deposit and Payment Terms\" document. \
         This is often sent with an invoice or included in an agreement.\n\
         \n\
         Details:\n\
         - Event Type: {event_type}\n\
         - Total Cost: ${total_cost}\n\
         - Deposit Amount: ${deposit_amount}\n\
         - Deposit Due Date: {deposit_due_date}\n\
         - Accepted Payment Methods: {payment_methods}\n\
         \n\
         The document should clearly state:\n\
         - The purpose of the deposit is to secure the event date, making it non-refundable.\n\
         - The deposit amount and due date.\n\
         - The remaining balance and its due date (e.g., 14 days before the event).\n\
         - How payments can be made.\n\
         - What happens if a payment is late."
    )
}

fn email_follow_up(
    base: &str,
    event_type: EventType,
    follow_up_type: EmailFollowUpType,
    dj_name: &str,
    client_name: &str,
    event_date: &str,
) -> String {
    let purpose = match follow_up_type {
        EmailFollowUpType::ReferralRequest => {
            "The purpose of this email is to politely request referrals from a happy client \
             a week or two after their event. Mention how much you enjoyed their event. \
             Briefly explain that your business grows through word-of-mouth. \
             You can optionally include a small incentive for a successful referral."
        }
        _ => "",
    };
    format!(
        "{base}\n\
         \n\
         Generate a professional email template for a DJ.\n\
         \n\
         Email Type: {follow_up_type} for a {event_type}.\n\
         \n\
         Details:\n\
         - DJ Name: {dj_name}\n\
         - Client Name: {client_name}\n\
         - Event Date: {event_date}\n\
         \n\
         {purpose}\n\
         \n\
         Based on the email type, write a suitable email. For a review request, \
         include placeholders for links to review sites like The Knot, WeddingWire, or Google."
    )
}

fn creative(
    brief: &CreativeBrief,
    event_type: EventType,
    tone: OutputTone,
    brand_voice: &str,
) -> String {
    match brief {
        CreativeBrief::McScript {
            script_type: McScriptType::PersonalizedStory,
            client_name,
            dj_name,
            client_fun_facts,
        } => personalized_story_script(
            event_type,
            tone,
            brand_voice,
            field(client_name, "[Client Name(s)]"),
            field(dj_name, "[DJ Name]"),
            field(client_fun_facts, "No facts provided."),
        ),
        CreativeBrief::McScript {
            script_type,
            client_name,
            dj_name,
            ..
        } => mc_script(
            event_type,
            *script_type,
            field(client_name, "[Client Name(s)]"),
            field(dj_name, "[DJ Name]"),
        ),
        CreativeBrief::SocialMediaPost {
            platform,
            dj_name,
            post_topic,
        } => social_media_post(
            tone,
            brand_voice,
            *platform,
            field(dj_name, "[DJ Name]"),
            field(post_topic, "A recap of a great event."),
        ),
        CreativeBrief::BlogPost { dj_name, post_topic } => blog_post(
            tone,
            brand_voice,
            field(dj_name, "us"),
            field(post_topic, "A Guide to Wedding Music Planning"),
        ),
        CreativeBrief::AiImage | CreativeBrief::AiVideo => {
            "Please generate helpful creative content for a DJ.".to_string()
        }
    }
}

fn personalized_story_script(
    event_type: EventType,
    tone: OutputTone,
    brand_voice: &str,
    client_name: &str,
    dj_name: &str,
    fun_facts: &str,
) -> String {
    format!(
        "You are a charismatic and professional event MC and storyteller, acting as an assistant for another DJ.\n\
         \n\
         Your task is to generate 3 distinct, short, and engaging stories or introductions that a DJ can use live at an event. \
         These stories should be based on the personal facts provided about the client(s). \
         The goal is to create a warm, memorable, and personalized moment.\n\
         \n\
         Event Type: {event_type}\n\
         Client(s) Name: {client_name}\n\
         DJ Name: {dj_name}\n\
         \n\
         Client Fun Facts (use these to build the story):\n\
         ---\n\
         {fun_facts}\n\
         ---\n\
         \n\
         Instructions:\n\
         - Create three versions, each with a different emotional angle.\n\
         - Version 1 should be **Heartfelt & Sweet**.\n\
         - Version 2 should be **Funny & High-Energy**.\n\
         - Version 3 should be **Cool & Charming**.\n\
         - Clearly label each version (e.g., \"--- OPTION 1: Heartfelt ---\").\n\
         - Keep each script concise (30-60 seconds when spoken) and easy to deliver.\n\
         - The tone should be {tone}. {brand_voice}\n\
         - End each script with a clear call to action (e.g., \"...Let's hear it for them!\", \"...let's get them on the dance floor!\")."
    )
}

fn mc_script(
    event_type: EventType,
    script_type: McScriptType,
    client_name: &str,
    dj_name: &str,
) -> String {
    format!(
        "You are a charismatic and experienced professional event MC, acting as an assistant for another DJ.\n\
         \n\
         Your task is to generate 3 distinct script options for a DJ to say during a {event_type}.\n\
         \n\
         Event Moment: {script_type}\n\
         Client(s) Name: {client_name}\n\
         DJ Name: {dj_name}\n\
         \n\
         Instructions:\n\
         - Create three versions, each with a slightly different personality.\n\
         - Version 1 should be **High-Energy & Fun**.\n\
         - Version 2 should be **Cool, Confident & Modern**.\n\
         - Version 3 should be **Warm, Elegant & Formal**.\n\
         - Clearly label each version (e.g., \"--- OPTION 1: High-Energy ---\").\n\
         - Keep each script concise, typically 30-60 seconds when spoken.\n\
         - Use placeholders like [Song Name] or [Next Event Item] where appropriate."
    )
}

fn social_media_post(
    tone: OutputTone,
    brand_voice: &str,
    platform: SocialMediaPlatform,
    dj_name: &str,
    post_topic: &str,
) -> String {
    format!(
        "You are a social media marketing expert specializing in the events industry, specifically for DJs.\n\
         \n\
         Your task is to write a compelling social media post for {dj_name}.\n\
         \n\
         Platform: {platform}\n\
         Post Goal/Topic: \"{post_topic}\"\n\
         \n\
         Instructions:\n\
         - Write in a tone that is {tone}. {brand_voice}\n\
         - Tailor the post to the specific platform.\n\
         - For **Instagram**, focus on an engaging caption that tells a story or asks a question. Provide a block of 5-10 relevant, popular hashtags.\n\
         - For **Facebook**, write a slightly longer, more conversational post. Encourage comments and sharing.\n\
         - For **Twitter / X**, keep it concise and punchy. Use 2-3 key hashtags.\n\
         - The post should be ready to copy and paste. Do not include any meta-commentary."
    )
}

fn blog_post(
    tone: OutputTone,
    brand_voice: &str,
    dj_name: &str,
    post_topic: &str,
) -> String {
    format!(
        "You are a social media and SEO marketing expert for DJs. Your task is to write an engaging, \
         helpful, and SEO-friendly blog post based on the following topic.\n\
         \n\
         Blog Post Topic: \"{post_topic}\"\n\
         Target Audience: Potential clients planning events (weddings, corporate parties, etc.).\n\
         \n\
         Instructions:\n\
         - The tone should be {tone}. {brand_voice}\n\
         - The article should be well-structured with a clear title, an introduction, several sub-headings (using markdown like '### Subheading'), and a conclusion.\n\
         - The content must be accurate, informative, and up-to-date.\n\
         - Naturally include keywords related to the topic.\n\
         - End with a call-to-action encouraging readers to contact {dj_name} for their next event.\n\
         - Do not add any extra commentary before the title or after the post. Output only the blog post content."
    )
}

#[allow(clippy::too_many_arguments)]
fn music_playlists(
    event_type: EventType,
    playlist_type: PlaylistType,
    client_name: &str,
    title_client: &str,
    genre_vibe: &str,
    must_play: &str,
    do_not_play: &str,
) -> String {
    format!(
        "You are an expert DJ and music curator with deep knowledge across all genres and decades. \
         Your task is to generate a list of song suggestions for a client's event.\n\
         \n\
         Event Type: {event_type}\n\
         Client: {client_name}\n\
         Playlist for: {playlist_type}\n\
         \n\
         Desired Genre / Vibe:\n\
         \"{genre_vibe}\"\n\
         \n\
         Client's Must-Play Songs (incorporate these and similar vibes):\n\
         ---\n\
         {must_play}\n\
         ---\n\
         \n\
         Client's Do-Not-Play List (strictly avoid these artists/songs):\n\
         ---\n\
         {do_not_play}\n\
         ---\n\
         \n\
         Instructions:\n\
         - Generate a list of 20-30 song suggestions that fit the client's request.\n\
         - Format the output as a numbered list with \"Artist - Song Title\".\n\
         - The suggestions should be thoughtful and create a cohesive flow for the specified part of the event.\n\
         - Ensure your suggestions are appropriate for a {event_type}.\n\
         - Do not include any songs or artists from the Do-Not-Play list.\n\
         - Begin the output with a clear title, like \"### {playlist_type} Suggestions for {title_client}\".\n\
         - Do not add any extra commentary or introduction before the title."
    )
}

fn sales_assistant(
    tone: OutputTone,
    brand_voice: &str,
    objection: SalesObjectionType,
    dj_name: &str,
    client_name: &str,
    quoted_price: &str,
) -> String {
    format!(
        "You are an expert sales coach and copywriter for professional DJs. \
         Your task is to generate 2-3 distinct, professional, and persuasive email/message responses to a common client objection. \
         The goal is to overcome the objection by highlighting value, building trust, and gently guiding the potential client toward booking.\n\
         \n\
         Client Objection: \"{objection}\"\n\
         \n\
         DJ Name: {dj_name}\n\
         Client Name: {client_name}\n\
         Your Quoted Price: ${quoted_price}\n\
         \n\
         Instructions:\n\
         - Create 2-3 distinct versions, each with a different strategic approach.\n\
         - Version 1 should focus on **Value & Experience**. Explain what the client is getting for the price beyond just \"playing music\" (e.g., MCing, planning, professional equipment, peace of mind).\n\
         - Version 2 should be **Empathetic & Solution-Oriented**. Acknowledge their concern and see if there are ways to adjust the package or payment plan without devaluing your service.\n\
         - Version 3 can be **Short, Confident & Direct**, for when you want to firmly but politely hold your ground.\n\
         - Clearly label each version (e.g., \"--- OPTION 1: The Value-Driven Approach ---\").\n\
         - The tone should be {tone}, but always professional and helpful. {brand_voice}\n\
         - Use placeholders where appropriate.\n\
         - Do not add any extra commentary before or after the responses."
    )
}

fn event_checklist(base: &str, event_type: EventType) -> String {
    format!(
        "{base}\n\
         \n\
         Generate a comprehensive, customizable planning checklist template for a DJ preparing for a {event_type}. \
         The checklist should be organized by timeline (e.g., \"Upon Booking\", \"3 Months Out\", \"1 Month Out\", \"Week Of Event\", \"Day Of Event\"). \
         It should be easy for a DJ to copy this template and modify it for their specific needs.\n\
         \n\
         Topics to cover include: Client Communication, Music Curation, Equipment Prep, Venue Logistics, Timeline Finalization, and Post-Event Tasks.\n\
         \n\
         {FORM_FORMATTING_INSTRUCTION}"
    )
}

fn pre_event_questionnaire(base: &str, event_type: EventType) -> String {
    format!(
        "{base}\n\
         \n\
         Generate a detailed pre-event client questionnaire for a {event_type}. \
         The goal is to gather all necessary information to ensure the event is a success. \
         Organize the questions into logical sections.\n\
         \n\
         For a **Wedding**, sections should include: Couple's Info, Key Contacts, Ceremony, Cocktail/Dinner Music, \
         Formalities (dances, toasts), Music Vibe (must plays/do not plays), and special announcements.\n\
         \n\
         For a **Corporate Event** or **Private Party**, sections should include: Client Info, Venue Logistics, \
         Event Timeline, Audience Demographics, Desired Atmosphere, and Technical Needs.\n\
         \n\
         {FORM_FORMATTING_INSTRUCTION}"
    )
}

fn post_event_questionnaire(base: &str, event_type: EventType) -> String {
    format!(
        "{base}\n\
         \n\
         Generate a professional post-event feedback questionnaire for a client after their {event_type}. \
         The goal is to gather constructive feedback and request a testimonial.\n\
         \n\
         The questionnaire should include sections for: Overall Experience, Music Selection, Professionalism/MCing, and Planning Process. \
         Include an open-ended question asking for a testimonial and another for suggestions for improvement.\n\
         \n\
         {FORM_FORMATTING_INSTRUCTION}"
    )
}

#[allow(clippy::too_many_arguments)]
fn event_timeline(
    base: &str,
    event_type: EventType,
    client_name: &str,
    event_date: &str,
    start_time: &str,
    end_time: &str,
) -> String {
    format!(
        "{base}\n\
         \n\
         Generate a detailed, customizable event timeline template for a {event_type}. \
         This timeline will serve as a foundational schedule for the DJ to coordinate with the client and other vendors.\n\
         \n\
         Details:\n\
         - Event Type: {event_type}\n\
         - Client: {client_name}\n\
         - Date: {event_date}\n\
         - Service Start Time: {start_time}\n\
         - Service End Time: {end_time}\n\
         \n\
         The timeline should be structured with time slots and corresponding activities. \
         It must include key moments typical for a {event_type}. \
         For a wedding, this includes ceremony, cocktail hour, grand entrance, dinner, toasts, first dance, parent dances, open dancing, cake cutting, and last dance. \
         For a corporate event, this includes guest arrival, opening remarks, dinner/cocktails, presentations/awards, and open networking/dancing.\n\
         \n\
         Present it in a clean, easy-to-read format with suggested timings based on the start and end times. \
         Use placeholders like \"[Time]\" for easy editing."
    )
}
