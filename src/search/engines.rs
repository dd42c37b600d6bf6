//! Built-in search engine table

use super::registry::EngineParam;

/// All built-in engines, in catalogue display order
pub(super) fn builtin() -> Vec<(&'static str, EngineParam)> {
    vec![
        ("bing", bing()),
        ("baidu", baidu()),
        ("google", google()),
        ("zhihu", zhihu()),
        ("weixin", weixin()),
        ("github", github()),
        ("kaifa", kaifa()),
        ("douban", douban()),
        ("movie", movie()),
        ("book", book()),
        ("360", so360()),
        ("sogou", sogou()),
    ]
}

pub(super) fn bing() -> EngineParam {
    EngineParam::new("bing搜索", "https://cn.bing.com", "/search?q={}")
}

fn baidu() -> EngineParam {
    EngineParam::new("baidu搜索", "https://www.baidu.com", "/s?wd={}")
}

fn google() -> EngineParam {
    EngineParam::new("google搜索", "https://www.google.com", "/search?q={}")
}

fn zhihu() -> EngineParam {
    EngineParam::new("zhihu搜索", "https://www.zhihu.com", "/search?type=content&q={}")
        .ajax_url("https://www.zhihu.com/api/v4/search_v3?t=general&q={}")
        .cookie("d_c0=1")
}

fn weixin() -> EngineParam {
    EngineParam::new("微信搜索", "https://weixin.sogou.com", "/weixin?type=2&query={}")
}

fn github() -> EngineParam {
    EngineParam::new("github搜索", "https://github.com", "/search?q={}&type=repositories")
}

fn kaifa() -> EngineParam {
    EngineParam::new("baidu开发者搜索", "https://kaifa.baidu.com", "/searchPage?wd={}")
        .ajax_url("https://kaifa.baidu.com/rest/v1/search?wd={}&pageNum=1&pageSize=10")
}

fn douban() -> EngineParam {
    EngineParam::new("豆瓣搜索", "https://www.douban.com", "/search?q={}")
}

fn movie() -> EngineParam {
    EngineParam::new(
        "豆瓣电影搜索",
        "https://search.douban.com",
        "/movie/subject_search?search_text={}",
    )
}

fn book() -> EngineParam {
    EngineParam::new(
        "豆瓣书籍搜索",
        "https://search.douban.com",
        "/book/subject_search?search_text={}",
    )
}

fn so360() -> EngineParam {
    EngineParam::new("360搜索", "https://www.so.com", "/s?q={}")
}

fn sogou() -> EngineParam {
    EngineParam::new("搜狗搜索", "https://www.sogou.com", "/web?query={}")
}
