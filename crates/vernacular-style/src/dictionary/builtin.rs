//! Built-in vocabulary of the localized dialect.
//!
//! Each table is the single source of truth for both translation directions.
//! Order matters: when two aliases share a canonical token, the one listed
//! first is the one generated text displays.

/// Element alias → selector.
pub(crate) const ELEMENTS: &[(&str, &str)] = &[
    ("页面", "body"),
    ("头部", "header"),
    ("导航栏", "nav"),
    ("主体", "main"),
    ("侧边栏", "aside"),
    ("页脚", "footer"),
    ("文章", "article"),
    ("卡片", ".card"),
    ("卡片标题", ".card .card-title"),
    ("标题", "h1"),
    ("副标题", "h2"),
    ("小标题", "h3"),
    ("段落", "p"),
    ("链接", "a"),
    ("悬停链接", "a:hover"),
    ("引用", "blockquote"),
    ("按钮", "button"),
    ("悬停按钮", "button:hover"),
    ("输入框", "input"),
    ("文本框", "textarea"),
    ("图片", "img"),
    ("列表", "ul"),
    ("列表项", "li"),
    ("头像框", ".profile-card .avatar-anchor"),
    ("徽章", ".profile-card .badge-anchor"),
    ("签名栏", ".post-footer .signature-anchor"),
    ("横幅挂件", "header .banner-anchor"),
];

/// Property alias → canonical property.
pub(crate) const PROPERTIES: &[(&str, &str)] = &[
    // Layout
    ("显示", "display"),
    ("定位", "position"),
    ("上", "top"),
    ("右", "right"),
    ("下", "bottom"),
    ("左", "left"),
    ("层级", "z-index"),
    ("浮动", "float"),
    ("弹性方向", "flex-direction"),
    ("自身对齐", "align-self"),
    ("项目对齐", "align-items"),
    ("内容对齐", "justify-content"),
    ("顺序", "order"),
    ("间隙", "gap"),
    // Box model
    ("宽度", "width"),
    ("高度", "height"),
    ("最小宽度", "min-width"),
    ("最大宽度", "max-width"),
    ("最小高度", "min-height"),
    ("最大高度", "max-height"),
    ("外边距", "margin"),
    ("上外边距", "margin-top"),
    ("右外边距", "margin-right"),
    ("下外边距", "margin-bottom"),
    ("左外边距", "margin-left"),
    ("内边距", "padding"),
    ("上内边距", "padding-top"),
    ("右内边距", "padding-right"),
    ("下内边距", "padding-bottom"),
    ("左内边距", "padding-left"),
    ("盒模型", "box-sizing"),
    ("溢出", "overflow"),
    // Border
    ("边框", "border"),
    ("边框宽度", "border-width"),
    ("边框样式", "border-style"),
    ("边框颜色", "border-color"),
    ("圆角", "border-radius"),
    ("轮廓", "outline"),
    // Background
    ("背景", "background"),
    ("背景颜色", "background-color"),
    ("背景色", "background-color"),
    ("背景图片", "background-image"),
    ("背景重复", "background-repeat"),
    ("背景尺寸", "background-size"),
    ("背景位置", "background-position"),
    ("背景固定", "background-attachment"),
    // Text
    ("颜色", "color"),
    ("文字颜色", "color"),
    ("字体", "font-family"),
    ("字号", "font-size"),
    ("字重", "font-weight"),
    ("字形", "font-style"),
    ("行高", "line-height"),
    ("对齐", "text-align"),
    ("文字装饰", "text-decoration"),
    ("字间距", "letter-spacing"),
    ("文字阴影", "text-shadow"),
    ("内容", "content"),
    // Effects
    ("透明度", "opacity"),
    ("不透明度", "opacity"),
    ("阴影", "box-shadow"),
    ("滤镜", "filter"),
    ("背景滤镜", "backdrop-filter"),
    ("变换", "transform"),
    ("过渡", "transition"),
    ("动画", "animation"),
    ("鼠标", "cursor"),
    ("指针事件", "pointer-events"),
    // Theme channels
    ("主题色通道", "--theme-rgb"),
    ("强调色通道", "--accent-rgb"),
    // Layout intent
    ("布局模式", "--layout-mode"),
    ("锚点位置", "--anchor-position"),
    ("水平偏移", "--offset-x"),
    ("垂直偏移", "--offset-y"),
    ("旋转角度", "--rotation"),
    // Decoration-only toggle
    ("限制溢出", "--contain-overflow"),
];

/// Keyword alias → canonical keyword, valid for any property.
pub(crate) const KEYWORDS: &[(&str, &str)] = &[
    ("无", "none"),
    ("自动", "auto"),
    ("隐藏", "hidden"),
    ("可见", "visible"),
    ("滚动条", "scroll"),
    ("继承", "inherit"),
    ("初始", "initial"),
    ("透明", "transparent"),
    ("块", "block"),
    ("行内", "inline"),
    ("行内块", "inline-block"),
    ("弹性", "flex"),
    ("网格", "grid"),
    ("居中", "center"),
    ("左对齐", "left"),
    ("右对齐", "right"),
    ("两端对齐", "justify"),
    ("常规", "normal"),
    ("粗体", "bold"),
    ("斜体", "italic"),
    ("下划线", "underline"),
    ("删除线", "line-through"),
    ("实线", "solid"),
    ("虚线", "dashed"),
    ("点线", "dotted"),
    ("双线", "double"),
    ("手型", "pointer"),
    ("默认", "default"),
    ("边框盒", "border-box"),
    ("内容盒", "content-box"),
    ("红色", "red"),
    ("白色", "white"),
    ("黑色", "black"),
    ("灰色", "gray"),
    ("蓝色", "blue"),
    ("绿色", "green"),
    ("黄色", "yellow"),
    ("粉色", "pink"),
    ("紫色", "purple"),
    ("橙色", "orange"),
    ("衬线", "serif"),
    ("无衬线", "sans-serif"),
    ("等宽", "monospace"),
];

/// Unit alias → canonical unit. Canonical units must be unique.
pub(crate) const UNITS: &[(&str, &str)] = &[
    ("像素", "px"),
    ("度", "deg"),
    ("毫秒", "ms"),
    ("秒", "s"),
    ("字", "em"),
    ("根字", "rem"),
    ("视宽", "vw"),
    ("视高", "vh"),
    ("百分比", "%"),
];

/// Property-scoped enumerations, consulted by the property handlers.
pub(crate) const ENUMERATIONS: &[(&[&str], &[(&str, &str)])] = &[
    (
        &["position"],
        &[
            ("静态", "static"),
            ("相对", "relative"),
            ("绝对", "absolute"),
            ("固定", "fixed"),
            ("粘性", "sticky"),
        ],
    ),
    (
        &["background-repeat"],
        &[
            ("不重复", "no-repeat"),
            ("重复", "repeat"),
            ("横向重复", "repeat-x"),
            ("纵向重复", "repeat-y"),
            ("间隔重复", "space"),
            ("拉伸重复", "round"),
        ],
    ),
    (
        &["background-size"],
        &[("铺满", "cover"), ("适应", "contain")],
    ),
    (
        &["background-position"],
        &[
            ("顶部", "top"),
            ("底部", "bottom"),
            ("左侧", "left"),
            ("右侧", "right"),
        ],
    ),
    (
        &["background-attachment"],
        &[("固定", "fixed"), ("滚动", "scroll"), ("局部", "local")],
    ),
    (
        &["background"],
        &[
            ("不重复", "no-repeat"),
            ("重复", "repeat"),
            ("横向重复", "repeat-x"),
            ("纵向重复", "repeat-y"),
            ("铺满", "cover"),
            ("适应", "contain"),
            ("顶部", "top"),
            ("底部", "bottom"),
            ("左侧", "left"),
            ("右侧", "right"),
            ("固定", "fixed"),
        ],
    ),
    (
        &["flex-direction"],
        &[
            ("横向", "row"),
            ("纵向", "column"),
            ("反向横向", "row-reverse"),
            ("反向纵向", "column-reverse"),
        ],
    ),
    (
        &["align-self", "align-items", "justify-content"],
        &[
            ("起点", "flex-start"),
            ("终点", "flex-end"),
            ("拉伸", "stretch"),
            ("均分", "space-between"),
        ],
    ),
    (
        &["--layout-mode"],
        &[("挤压", "squeeze"), ("悬浮", "overlay")],
    ),
    (
        &["--anchor-position"],
        &[
            ("上左", "top-left"),
            ("上中", "top-center"),
            ("上右", "top-right"),
            ("下左", "bottom-left"),
            ("下中", "bottom-center"),
            ("下右", "bottom-right"),
            ("左上", "left-top"),
            ("左中", "left-middle"),
            ("左下", "left-bottom"),
            ("右上", "right-top"),
            ("右中", "right-middle"),
            ("右下", "right-bottom"),
        ],
    ),
    (&["--contain-overflow"], &[("是", "true"), ("否", "false")]),
];

/// Localized function name → canonical function name, and whether its
/// arguments are themselves translated.
pub(crate) const FUNCTIONS: &[(&str, &str, bool)] = &[
    ("旋转", "rotate", true),
    ("缩放", "scale", true),
    ("平移", "translate", true),
    ("横移", "translateX", true),
    ("纵移", "translateY", true),
    ("倾斜", "skew", true),
    ("模糊", "blur", true),
    ("亮度", "brightness", true),
    ("对比度", "contrast", true),
    ("灰度", "grayscale", true),
    ("饱和度", "saturate", true),
    ("怀旧", "sepia", true),
    ("色相旋转", "hue-rotate", true),
    ("反色", "invert", true),
    ("投影", "drop-shadow", true),
    ("线性渐变", "linear-gradient", true),
    ("径向渐变", "radial-gradient", true),
    ("计算", "calc", true),
    ("图片", "url", false),
    ("变量", "var", false),
];

/// Category title, selector pattern, display rank.
///
/// Rules are matched against the patterns in list order; categories are
/// displayed by rank. Anything unmatched lands in [`FALLBACK_CATEGORY`].
pub(crate) const CATEGORIES: &[(&str, &str, u8)] = &[
    ("装饰挂件", r"-anchor\b", 4),
    ("卡片组件", r"^\.card\b", 1),
    ("页面结构", r"^(body|header|nav|main|aside|footer|article)\b", 0),
    ("文字排版", r"^(h[1-6]|p|a|span|blockquote|ul|ol|li)\b", 2),
    ("交互控件", r"^(button|input|textarea|select|label)\b", 3),
];

/// Title of the category for rules no pattern matches.
pub(crate) const FALLBACK_CATEGORY: &str = "其他";
