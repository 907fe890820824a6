use autolinker_core::{
    auto_link, auto_link_with, autolink, autolink_with, AutolinkOptions, LinkMode, LinkTextStyle,
};

fn opts_mode(mode: LinkMode) -> AutolinkOptions {
    AutolinkOptions { mode, ..Default::default() }
}

fn verbatim() -> AutolinkOptions {
    AutolinkOptions { link_text: LinkTextStyle::Verbatim, ..Default::default() }
}

fn link_with(text: &str, opts: &AutolinkOptions) -> (String, usize) {
    let linked = autolink(text.as_bytes(), opts).expect("autolink");
    (String::from_utf8(linked.output.into_owned()).expect("utf8"), linked.link_count)
}

fn assert_linked(expected: &str, text: &str) {
    assert_eq!(link_with(text, &verbatim()).0, expected, "input: {text:?}");
}

fn anchor(link: &str) -> String {
    format!("<a href=\"{link}\">{link}</a>")
}

#[test]
fn bare_url() {
    assert_eq!(
        link_with("Check http://example.com please", &opts_mode(LinkMode::Urls)),
        ("Check <a href=\"http://example.com\">http://example.com</a> please".to_string(), 1)
    );
}

#[test]
fn www_host() {
    assert_eq!(
        link_with("visit www.example.com now", &opts_mode(LinkMode::All)),
        ("visit <a href=\"http://www.example.com\">www.example.com</a> now".to_string(), 1)
    );
}

#[test]
fn email_address() {
    assert_eq!(
        link_with("Contact me at foo.bar@example.com today", &opts_mode(LinkMode::All)),
        ("Contact me at <a href=\"mailto:foo.bar@example.com\">foo.bar@example.com</a> today".to_string(), 1)
    );
}

#[test]
fn balanced_parenthesis_retained() {
    let url = "http://x.com/Pikachu_(Electric)";
    assert_eq!(
        link_with(&format!("foo {url} bar"), &AutolinkOptions::default()),
        (format!("foo {} bar", anchor(url)), 1)
    );
}

#[test]
fn unbalanced_trailing_parenthesis_dropped() {
    let url = "http://x.com/Pikachu_(Electric)";
    assert_eq!(
        link_with(&format!("(foo {url}) bar"), &AutolinkOptions::default()),
        (format!("(foo {}) bar", anchor(url)), 1)
    );
}

#[test]
fn skip_tag_contents_unchanged() {
    assert_eq!(
        link_with("<pre>http://example.com</pre>", &AutolinkOptions::default()),
        ("<pre>http://example.com</pre>".to_string(), 0)
    );
}

#[test]
fn unsafe_scheme_is_not_linked() {
    assert_eq!(
        link_with("call javascript:alert(1) now", &AutolinkOptions::default()),
        ("call javascript:alert(1) now".to_string(), 0)
    );
}

#[test]
fn mode_gating() {
    let text = "mail bob@example.com or see http://x.com";
    let (urls, n) = link_with(text, &opts_mode(LinkMode::Urls));
    assert_eq!(n, 1);
    assert_eq!(urls, format!("mail bob@example.com or see {}", anchor("http://x.com")));

    let (emails, n) = link_with(text, &opts_mode(LinkMode::EmailAddresses));
    assert_eq!(n, 1);
    assert_eq!(emails, "mail <a href=\"mailto:bob@example.com\">bob@example.com</a> or see http://x.com");

    assert_eq!(link_with(text, &opts_mode(LinkMode::All)).1, 2);
}

#[test]
fn escapes_quotes_in_href() {
    let url = r#"http://website.com/"onmouseover=document.body.style.backgroundColor="pink";//"#;
    assert_linked(
        r#"<a href="http://website.com/&quot;onmouseover=document.body.style.backgroundColor=&quot;pink&quot;;//">http://website.com/"onmouseover=document.body.style.backgroundColor="pink";//</a>"#,
        url,
    );
    // 默认显示文本会做 HTML 转义
    let (escaped, _) = link_with(url, &AutolinkOptions::default());
    assert!(escaped.ends_with(
        r#">http://website.com/&quot;onmouseover=document.body.style.backgroundColor=&quot;pink&quot;;//</a>"#
    ));
}

#[test]
fn default_link_text_is_html_escaped() {
    let (out, _) = link_with("go http://a.com/?x=1&y=<2>", &AutolinkOptions::default());
    assert_eq!(out, "go <a href=\"http://a.com/?x=1&y=\">http://a.com/?x=1&amp;y=</a><2>");
}

#[test]
fn single_trailing_punctuation() {
    let url = "http://www.youtube.com";
    for punc in ["?", "!", ".", ",", ":"] {
        assert_linked(&format!("link: {}{punc} foo?", anchor(url)), &format!("link: {url}{punc} foo?"));
    }
}

#[test]
fn unterminated_tag_is_left_alone() {
    assert_linked("< this is just a test", "< this is just a test");
}

#[test]
fn custom_skip_tags() {
    let html = "This is just a test. http://www.pokemon.com\n<div>\n  More test\n  http://www.amd.com\n</div>\n<pre>\n  CODE www.less.es\n</pre>\n";
    let expected = "This is just a test. <a href=\"http://www.pokemon.com\">http://www.pokemon.com</a>\n<div>\n  More test\n  http://www.amd.com\n</div>\n<pre>\n  CODE <a href=\"http://www.less.es\">www.less.es</a>\n</pre>\n";
    let opts = AutolinkOptions { skip_tags: vec!["div".into(), "a".into()], ..verbatim() };
    assert_eq!(link_with(html, &opts), (expected.to_string(), 2));

    let text = "This is just a <pa>http://www.pokemon.com</pa> test";
    let opts = AutolinkOptions { skip_tags: vec!["pa".into()], ..Default::default() };
    assert_eq!(link_with(text, &opts).1, 0);
    assert_eq!(link_with(text, &AutolinkOptions::default()).1, 1);
}

#[test]
fn brackets() {
    for raw in [
        "http://en.wikipedia.org/wiki/Sprite_(computer_graphics)",
        "http://en.wikipedia.org/wiki/Sprite_[computer_graphics]",
        "http://en.wikipedia.org/wiki/Sprite_{computer_graphics}",
    ] {
        assert_linked(&anchor(raw), raw);
    }
    let raw = "http://en.wikipedia.org/wiki/Sprite_(computer_graphics)";
    assert_linked(&format!("(link: {})", anchor(raw)), &format!("(link: {raw})"));
    let raw = "http://en.wikipedia.org/wiki/Sprite_[computer_graphics]";
    assert_linked(&format!("[link: {}]", anchor(raw)), &format!("[link: {raw}]"));
    let raw = "http://en.wikipedia.org/wiki/Sprite_{computer_graphics}";
    assert_linked(&format!("{{link: {}}}", anchor(raw)), &format!("{{link: {raw}}}"));
}

#[test]
fn multiple_trailing_punctuations() {
    let url = "http://youtube.com";
    assert_linked(&format!("(link: {}).", anchor(url)), &format!("(link: {url})."));
}

#[test]
fn link_text_producer() {
    let url = "http://api.rubyonrails.com/Foo.html";
    let email = "fantabulous@shiznadel.ic";
    let text = format!("<p>{url}<br />{email}<br /></p>");
    let linked = autolink_with(text.as_bytes(), &AutolinkOptions::default(), |link| {
        let mut short = link[..7].to_vec();
        short.extend_from_slice(b"...");
        short
    })
    .unwrap();
    assert_eq!(linked.link_count, 2);
    assert_eq!(
        String::from_utf8(linked.output.into_owned()).unwrap(),
        format!("<p><a href=\"{url}\">http://...</a><br /><a href=\"mailto:{email}\">fantabu...</a><br /></p>")
    );
}

#[test]
fn link_text_producer_with_html() {
    let pic = "http://example.com/pic.png";
    let url = "http://example.com/album?a&amp;b=c";
    let text = format!("My pic: {pic} -- full album here {url}");
    let out = auto_link_with(&text, &AutolinkOptions::default(), |link| {
        if link.ends_with(".png") {
            format!("<img src=\"{link}\" width=\"160px\">")
        } else {
            link.to_string()
        }
    })
    .unwrap();
    assert_eq!(
        out,
        format!("My pic: <a href=\"{pic}\"><img src=\"{pic}\" width=\"160px\"></a> -- full album here {}", anchor(url))
    );
}

#[test]
fn producer_receives_exact_link() {
    let mut seen = Vec::new();
    let out = auto_link_with("Find ur favorite pokeman @ http://www.pokemon.com", &AutolinkOptions::default(), |link| {
        seen.push(link.to_string());
        "POKEMAN WEBSITE".to_string()
    })
    .unwrap();
    assert_eq!(seen, ["http://www.pokemon.com"]);
    assert_eq!(out, "Find ur favorite pokeman @ <a href=\"http://www.pokemon.com\">POKEMAN WEBSITE</a>");
}

#[test]
fn already_linked_text_is_unchanged() {
    for html in [
        "<a href=\"http://www.rubyonrails.com\">Ruby On Rails</a>",
        "'<a href=\"http://www.example.com\">www.example.com</a>'",
        "'<a href=\"http://www.example.com\" rel=\"nofollow\">www.example.com</a>'",
        "'<a href=\"http://www.example.com\"><b>www.example.com</b></a>'",
        "'<a href=\"#close\">close</a> <a href=\"http://www.example.com\"><b>www.example.com</b></a>'",
        "<a href=\"mailto:david@loudthinking.com\">Mail me</a>",
    ] {
        assert_eq!(link_with(html, &AutolinkOptions::default()), (html.to_string(), 0));
    }
}

#[test]
fn links_at_end_of_line() {
    let url1 = "http://api.rubyonrails.com/Foo.html";
    let url2 = "http://www.ruby-doc.org/core/Bar.html";
    assert_linked(
        &format!("<p>{}<br />{}<br /></p>", anchor(url1), anchor(url2)),
        &format!("<p>{url1}<br />{url2}<br /></p>"),
    );
}

#[test]
fn short_domains_flag() {
    let url = "http://google";
    let short = AutolinkOptions { short_domains: true, ..Default::default() };
    assert_eq!(link_with(url, &short), (anchor(url), 1));
    assert_eq!(link_with(url, &AutolinkOptions::default()), (url.to_string(), 0));
    // www 与邮箱不受影响
    assert_eq!(link_with("www.google bob@google", &short).1, 1);
}

#[test]
fn www_inside_word_is_not_linked() {
    assert_linked("Awww... man", "Awww... man");
}

#[test]
fn dashes_and_anchors_stay_in_link() {
    for url in [
        "http://example.com/Notification_Center-GitHub-20101108-140050.jpg",
        "https://github.com/github/hubot/blob/master/scripts/cream.js#L20-20",
    ] {
        assert_linked(&anchor(url), url);
    }
}

#[test]
fn trailing_entity_is_excluded() {
    let url = "http://example.com";
    assert_linked(&format!("&lt;{}&gt;", anchor(url)), &format!("&lt;{url}&gt;"));
}

#[test]
fn links_like_rails() {
    for url in [
        "http://www.rubyonrails.com",
        "http://www.rubyonrails.com:80",
        "http://www.rubyonrails.com/~minam",
        "https://www.rubyonrails.com/~minam",
        "http://www.rubyonrails.com/~minam/url%20with%20spaces",
        "http://www.rubyonrails.com/foo.cgi?something=here",
        "http://www.rubyonrails.com/foo.cgi?something=here&amp;and=here",
        "http://www.rubyonrails.com/contact;new",
        "http://www.rubyonrails.com/contact;new%20with%20spaces",
        "http://www.rubyonrails.com/contact;new?with=query&amp;string=params",
        "http://en.wikipedia.org/wiki/Wikipedia:Today%27s_featured_picture_%28animation%29/January_20%2C_2007",
        "http://www.mail-archive.com/rails@lists.rubyonrails.org/",
        "http://en.wikipedia.org/wiki/Sprite_(computer_graphics)",
        "http://en.wikipedia.org/wiki/Texas_hold%27em",
        "https://www.google.com/doku.php?id=gps:resource:scs:start",
    ] {
        assert_linked(&anchor(url), url);
    }
}

#[test]
fn links_in_prose() {
    let link = "http://www.rubyonrails.com";
    let email = "david@loudthinking.com";
    let mail = format!("<a href=\"mailto:{email}\">{email}</a>");
    let www = "<a href=\"http://www.rubyonrails.com\">www.rubyonrails.com</a>";

    assert_linked(
        &format!("Go to {} and say hello to {mail}", anchor(link)),
        &format!("Go to {link} and say hello to {email}"),
    );
    assert_linked(
        &format!("<p>Go to {}, then say hello to {mail}.</p>", anchor(link)),
        &format!("<p>Go to {link}, then say hello to {email}.</p>"),
    );
    assert_linked(
        &format!("<p>Say hello to {mail}, then go to {www},</p>"),
        &format!("<p>Say hello to {email}, then go to www.rubyonrails.com,</p>"),
    );

    let l3 = "http://manuals.ruby-on-rails.com/read/chapter.need_a-period/103#page281";
    assert_linked(
        &format!("<p>Go to {a}. seriously, {a}? i think I'll say hello to {mail}. instead.</p>", a = anchor(l3)),
        &format!("<p>Go to {l3}. seriously, {l3}? i think I'll say hello to {email}. instead.</p>"),
    );

    let l9 = "http://business.timesonline.co.uk/article/0,,9065-2473189,00.html";
    assert_linked(&format!("Go to {}.", anchor(l9)), &format!("Go to {l9}."));

    let l10 = "http://www.mail-archive.com/ruby-talk@ruby-lang.org/";
    assert_linked(&format!("<p>{} Link</p>", anchor(l10)), &format!("<p>{l10} Link</p>"));

    assert_linked(
        "<a href=\"mailto:+david@loudthinking.com\">+david@loudthinking.com</a>",
        "+david@loudthinking.com",
    );
    assert_linked(
        &format!("{a} {a} {a}", a = anchor(link)),
        &format!("{link} {link} {link}"),
    );
}

#[test]
fn adjacent_emails_do_not_overlap() {
    assert_eq!(
        link_with("a+b@d.com+e@f.com", &AutolinkOptions::default()),
        (
            "<a href=\"mailto:a+b@d.com\">a+b@d.com</a><a href=\"mailto:+e@f.com\">+e@f.com</a>".to_string(),
            2
        )
    );
}

#[test]
fn multibyte_local_part() {
    assert_eq!(
        auto_link("mail: José@example.com!", &AutolinkOptions::default()).unwrap(),
        "mail: <a href=\"mailto:José@example.com\">José@example.com</a>!"
    );
    assert_eq!(
        auto_link("联系\u{3000}user@example.com", &AutolinkOptions::default()).unwrap(),
        "联系\u{3000}<a href=\"mailto:user@example.com\">user@example.com</a>"
    );
}

#[test]
fn link_attr_is_inserted_verbatim() {
    let opts = AutolinkOptions { link_attr: Some(" target=\"_blank\"".into()), ..Default::default() };
    assert_eq!(
        link_with("http://www.rubyonrails.com", &opts).0,
        "<a href=\"http://www.rubyonrails.com\" target=\"_blank\">http://www.rubyonrails.com</a>"
    );
}

#[test]
fn blank_and_unlinked_strings() {
    assert_eq!(auto_link("", &AutolinkOptions::default()).unwrap(), "");
    assert_eq!(auto_link("   ", &AutolinkOptions::default()).unwrap(), "");
    let text = "nothing here";
    let out = auto_link(text, &AutolinkOptions::default()).unwrap();
    assert!(matches!(out, std::borrow::Cow::Borrowed(s) if std::ptr::eq(s, text)));
}
