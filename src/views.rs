//! HTML rendering. Pure functions: handlers hand over plain data, nothing
//! here touches the session, the stores, or the filesystem.

use crate::logic::DuplicateFlags;
use crate::models::{Gender, PlayerRecord, BELT_DEGREES, DEFAULT_SPORT};

pub const LOGIN_ERROR: &str = "خطأ في اسم المستخدم أو كلمة المرور. حاول مرة أخرى.";
pub const MSG_UPDATED: &str = "تم تحديث البيانات بنجاح!";
pub const MSG_PHOTO_UPLOAD_FAILED: &str = "حدث خطأ أثناء رفع الصورة الجديدة.";
pub const ERR_NO_PLAYER_SELECTED: &str =
    "خطأ: لم يتم تحديد اللاعب. الرجاء العودة للداشبورد والضغط على 'تعديل'.";
pub const ERR_PLAYER_NOT_FOUND: &str = "لم يتم العثور على اللاعب بالمعرف المحدد.";

const BASE_STYLE: &str = "body { font-family: Arial, sans-serif; background: linear-gradient(to bottom, #f0f4f8, #ffffff); margin: 0; padding: 20px; } \
h1 { color: #8b4513; } \
.card { width: 100%; max-width: 550px; margin: 40px auto; padding: 30px; background: #fff; border-radius: 12px; box-shadow: 0 8px 25px rgba(0,0,0,0.1); box-sizing: border-box; } \
.form-group { margin-bottom: 18px; text-align: right; } \
label { display: block; font-weight: bold; color: #333; margin-bottom: 6px; } \
input, select { padding: 10px; border: 1px solid #ccc; border-radius: 6px; width: 100%; box-sizing: border-box; } \
button { padding: 12px 25px; border: none; border-radius: 6px; background: #8b4513; color: white; cursor: pointer; font-weight: bold; font-size: 16px; width: 100%; } \
button:hover { background: #a0522d; } \
.error-message { background: #f8d7da; color: #721c24; border: 1px solid #f5c6cb; padding: 10px; border-radius: 6px; margin-bottom: 20px; text-align: center; } \
.message { background: #d4edda; color: #155724; border: 1px solid #c3e6cb; padding: 15px; border-radius: 5px; margin-bottom: 20px; text-align: center; }";

/// Replace the characters that matter in HTML text and attribute positions.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, extra_style: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<title>{}</title>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <style>{}{}</style>\n</head>\n<body>\n{}\n</body>\n</html>",
        escape(title),
        BASE_STYLE,
        extra_style,
        body
    )
}

pub fn login_page(error: Option<&str>) -> String {
    let mut body = String::from("<div class=\"card\" style=\"text-align: center;\">");
    body.push_str("<h1>تسجيل دخول لوحة التحكم</h1>");
    if let Some(message) = error {
        body.push_str(&format!(
            "<div class=\"error-message\">{}</div>",
            escape(message)
        ));
    }
    body.push_str(
        "<form action=\"/admin_login\" method=\"POST\">\
         <div class=\"form-group\"><label for=\"username\">اسم المستخدم:</label>\
         <input type=\"text\" id=\"username\" name=\"username\" required></div>\
         <div class=\"form-group\"><label for=\"password\">كلمة المرور:</label>\
         <input type=\"password\" id=\"password\" name=\"password\" required></div>\
         <button type=\"submit\">تسجيل الدخول</button></form></div>",
    );
    page("Admin Login - Gold Star", "", &body)
}

/// One dashboard table row: the record plus the serving URL of its photo
/// when the file actually exists (resolved by the handler, not here — the
/// upload directory is configurable, so the stored filesystem path is not a
/// usable URL).
pub struct DashboardRow {
    pub record: PlayerRecord,
    pub photo_url: Option<String>,
}

const DASHBOARD_STYLE: &str = " .table-container { width: 100%; overflow-x: auto; background: #fff; border-radius: 10px; box-shadow: 0 5px 15px rgba(0,0,0,0.1); margin-top: 20px; } \
table { width: 100%; border-collapse: collapse; } \
th, td { padding: 12px; border: 1px solid #ddd; text-align: right; white-space: nowrap; } \
th { background: #8b4513; color: white; } \
tr:nth-child(even) { background: #f9f9f9; } \
td img { width: 50px; height: 50px; object-fit: cover; border-radius: 5px; } \
.logout-link { position: absolute; top: 20px; right: 20px; background: #D90000; color: white; padding: 8px 12px; text-decoration: none; border-radius: 5px; font-size: 14px; } \
.search-container { background: #fff; padding: 15px; border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,0.1); margin-bottom: 20px; display: flex; gap: 10px; } \
.search-container form { display: flex; flex-grow: 1; gap: 10px; } \
.search-container input { flex-grow: 1; width: auto; } \
.search-container button, .search-container a { width: auto; padding: 10px 15px; background: #007bff; color: white; border-radius: 5px; text-decoration: none; } \
.action-btn { padding: 5px 10px; text-decoration: none; color: white; border-radius: 4px; font-size: 12px; margin: 0 2px; display: inline-block; } \
.action-btn.edit { background: #28a745; } .action-btn.delete { background: #dc3545; }";

pub fn dashboard_page(rows: &[DashboardRow], search_term: &str) -> String {
    let mut body = String::new();
    body.push_str("<a href=\"/logout\" class=\"logout-link\">تسجيل الخروج</a>");
    body.push_str("<h1>لوحة التحكم: بيانات اللاعبين المسجلين</h1>");
    body.push_str(
        "<div class=\"search-container\">\
         <form action=\"/dashboard\" method=\"GET\">",
    );
    body.push_str(&format!(
        "<input type=\"text\" name=\"search\" placeholder=\"ابحث بالاسم أو الكود...\" value=\"{}\">",
        escape(search_term)
    ));
    body.push_str(
        "<button type=\"submit\">بحث</button></form>\
         <a href=\"/dashboard\">عرض الكل</a>\
         <a href=\"/register\">تسجيل لاعب جديد</a></div>",
    );
    body.push_str("<div class=\"table-container\"><table><thead><tr>");
    for heading in [
        "الكود",
        "الاسم",
        "الصورة",
        "رقم قومي (اللاعب)",
        "تاريخ الميلاد",
        "السن",
        "النوع",
        "التليفون",
        "العنوان",
        "اسم الأب",
        "رقم قومي (الأب)",
        "وظيفة الأب",
        "اسم الأم",
        "رقم قومي (الأم)",
        "وظيفة الأم",
        "الرياضة",
        "الحزام",
        "رقم اللاعب",
        "الاشتراك (ج)",
        "تاريخ التسجيل",
        "إجراءات",
    ] {
        body.push_str(&format!("<th>{heading}</th>"));
    }
    body.push_str("</tr></thead><tbody>");
    if rows.is_empty() {
        let empty = if search_term.is_empty() {
            "لا يوجد أي بيانات مسجلة حتى الآن.".to_string()
        } else {
            format!(
                "لا توجد نتائج للبحث عن \"{}\".",
                escape(search_term)
            )
        };
        body.push_str(&format!(
            "<tr><td colspan=\"21\" style=\"text-align: center;\">{empty}</td></tr>"
        ));
    }
    for row in rows {
        let r = &row.record;
        let photo_cell = match row.photo_url.as_deref() {
            Some(url) => format!(
                "<a href=\"{0}\" target=\"_blank\"><img src=\"{0}\" alt=\"صورة اللاعب {1}\"></a>",
                escape(url),
                escape(&r.name)
            ),
            None => "لا يوجد".to_string(),
        };
        let optional = |value: &Option<String>| escape(value.as_deref().unwrap_or(""));
        body.push_str(&format!(
            "<tr><td>{id}</td><td>{name}</td><td>{photo}</td><td>{nid}</td>\
             <td>{dob}</td><td>{age}</td><td>{gender}</td><td>{phone}</td><td>{address}</td>\
             <td>{father}</td><td>{father_nid}</td><td>{father_job}</td>\
             <td>{mother}</td><td>{mother_nid}</td><td>{mother_job}</td>\
             <td>{sport}</td><td>{belt}</td><td>{number}</td><td>{fee:.2}</td><td>{registered}</td>\
             <td><a href=\"/edit_player?id={id}\" class=\"action-btn edit\">تعديل</a>\
             <a href=\"/delete_player?id={id}\" class=\"action-btn delete\" \
             onclick=\"return confirm('هل أنت متأكد من حذف هذا اللاعب؟ سيتم مسح بياناته وصورته نهائياً.');\">حذف</a></td></tr>",
            id = r.id,
            name = escape(&r.name),
            photo = photo_cell,
            nid = optional(&r.national_id),
            dob = r.date_of_birth.format("%Y-%m-%d"),
            age = r.age,
            gender = r.gender.as_str(),
            phone = escape(&r.phone_number),
            address = escape(&r.address),
            father = escape(&r.father_name),
            father_nid = optional(&r.father_national_id),
            father_job = escape(&r.father_job),
            mother = escape(&r.mother_name),
            mother_nid = optional(&r.mother_national_id),
            mother_job = escape(&r.mother_job),
            sport = escape(&r.sport),
            belt = escape(&r.belt_degree),
            number = optional(&r.player_number),
            fee = r.subscription_fee,
            registered = r
                .registration_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        ));
    }
    body.push_str("</tbody></table></div>");
    page("Dashboard - بيانات اللاعبين", DASHBOARD_STYLE, &body)
}

fn belt_options(selected: Option<&str>) -> String {
    let selected = selected.map(str::trim);
    BELT_DEGREES
        .iter()
        .map(|belt| {
            let attr = if selected == Some(belt.trim()) {
                " selected"
            } else {
                ""
            };
            format!("<option value=\"{belt}\"{attr}>{belt}</option>")
        })
        .collect()
}

fn gender_radios(current: Gender) -> String {
    let checked = |g: Gender| if current == g { " checked" } else { "" };
    format!(
        "<input type=\"radio\" id=\"male\" name=\"gender\" value=\"male\"{} required>\
         <label for=\"male\" style=\"display: inline;\">ذكر</label>\
         <input type=\"radio\" id=\"female\" name=\"gender\" value=\"female\"{} required>\
         <label for=\"female\" style=\"display: inline;\">أنثى</label>",
        checked(Gender::Male),
        checked(Gender::Female)
    )
}

/// Shared field list of the registration and edit forms. `values` prefills
/// the inputs; `None` renders a blank registration form.
fn player_form_fields(values: Option<&PlayerRecord>) -> String {
    let text = |get: fn(&PlayerRecord) -> &str| values.map(get).map(escape).unwrap_or_default();
    let optional = |get: fn(&PlayerRecord) -> Option<&str>| {
        values.and_then(get).map(escape).unwrap_or_default()
    };
    let mut out = String::new();
    let mut field = |label: &str, input: String| {
        out.push_str(&format!(
            "<div class=\"form-group\"><label>{label}</label>{input}</div>"
        ));
    };
    field(
        "الاسم:",
        format!(
            "<input type=\"text\" name=\"playerName\" value=\"{}\" required>",
            text(|r| &r.name)
        ),
    );
    field(
        "رقم قومي (اللاعب):",
        format!(
            "<input type=\"number\" name=\"playerNID\" value=\"{}\">",
            optional(|r| r.national_id.as_deref())
        ),
    );
    field(
        "اسم الأب:",
        format!(
            "<input type=\"text\" name=\"fatherName\" value=\"{}\" required>",
            text(|r| &r.father_name)
        ),
    );
    field(
        "رقم قومي (الأب):",
        format!(
            "<input type=\"number\" name=\"fatherNID\" value=\"{}\">",
            optional(|r| r.father_national_id.as_deref())
        ),
    );
    field(
        "وظيفة الأب:",
        format!(
            "<input type=\"text\" name=\"fatherJob\" value=\"{}\" required>",
            text(|r| &r.father_job)
        ),
    );
    field(
        "اسم الأم:",
        format!(
            "<input type=\"text\" name=\"motherName\" value=\"{}\" required>",
            text(|r| &r.mother_name)
        ),
    );
    field(
        "رقم قومي (الأم):",
        format!(
            "<input type=\"number\" name=\"motherNID\" value=\"{}\">",
            optional(|r| r.mother_national_id.as_deref())
        ),
    );
    field(
        "وظيفة الأم:",
        format!(
            "<input type=\"text\" name=\"motherJob\" value=\"{}\" required>",
            text(|r| &r.mother_job)
        ),
    );
    field(
        "السن:",
        format!(
            "<input type=\"number\" name=\"age\" value=\"{}\" required>",
            values.map(|r| r.age.to_string()).unwrap_or_default()
        ),
    );
    field(
        "تاريخ الميلاد:",
        format!(
            "<input type=\"date\" name=\"playerDob\" value=\"{}\" required>",
            values
                .map(|r| r.date_of_birth.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        ),
    );
    field(
        "التليفون:",
        format!(
            "<input type=\"tel\" name=\"phoneNumber\" value=\"{}\" required>",
            text(|r| &r.phone_number)
        ),
    );
    field(
        "العنوان:",
        format!(
            "<input type=\"text\" name=\"address\" value=\"{}\" required>",
            text(|r| &r.address)
        ),
    );
    field(
        "رقم اللاعب:",
        format!(
            "<input type=\"number\" name=\"playerNumber\" value=\"{}\">",
            optional(|r| r.player_number.as_deref())
        ),
    );
    field(
        "النوع:",
        gender_radios(values.map(|r| r.gender).unwrap_or_default()),
    );
    field(
        "الرياضة:",
        format!(
            "<input type=\"text\" name=\"sport\" value=\"{}\" required>",
            values
                .map(|r| escape(&r.sport))
                .unwrap_or_else(|| DEFAULT_SPORT.to_string())
        ),
    );
    field(
        "الحزام:",
        format!(
            "<select name=\"beltDegree\" required>{}</select>",
            belt_options(values.map(|r| r.belt_degree.as_str()))
        ),
    );
    field(
        "الاشتراك (ج):",
        format!(
            "<input type=\"number\" name=\"subscriptionFee\" value=\"{}\" required step=\"0.01\">",
            values
                .map(|r| format!("{:.2}", r.subscription_fee))
                .unwrap_or_default()
        ),
    );
    out
}

pub fn register_page() -> String {
    let mut body = String::new();
    body.push_str(
        "<div class=\"card\"><h1 style=\"text-align: center;\">تسجيل لاعب جديد</h1>\
         <form action=\"/register\" method=\"post\" enctype=\"multipart/form-data\">",
    );
    body.push_str(
        "<div class=\"form-group\"><label for=\"pPhoto\">صورة اللاعب (اختياري):</label>\
         <input type=\"file\" id=\"pPhoto\" name=\"playerPhoto\" accept=\"image/*\"></div>",
    );
    body.push_str(&player_form_fields(None));
    body.push_str("<button type=\"submit\">تسجيل</button></form>");
    body.push_str(
        "<p style=\"text-align: center;\"><a href=\"/dashboard\">الرجوع إلى لوحة التحكم</a></p></div>",
    );
    page("تسجيل لاعب جديد - Gold Star", "", &body)
}

pub fn edit_page(record: &PlayerRecord, photo_url: Option<&str>, message: Option<&str>) -> String {
    let mut body = String::new();
    body.push_str(&format!(
        "<div style=\"text-align: center;\"><h1>تعديل بيانات: {}</h1>\
         <a href=\"/dashboard\" style=\"display: inline-block; margin-top: 10px; padding: 10px 20px; \
         background: #6c757d; color: white; text-decoration: none; border-radius: 5px;\">الرجوع إلى لوحة التحكم</a></div>",
        escape(&record.name)
    ));
    body.push_str(
        "<form action=\"/edit_player\" method=\"post\" class=\"card\" enctype=\"multipart/form-data\">",
    );
    if let Some(message) = message {
        body.push_str(&format!("<div class=\"message\">{}</div>", escape(message)));
    }
    body.push_str(&format!(
        "<input type=\"hidden\" name=\"player_id\" value=\"{}\">\
         <input type=\"hidden\" name=\"current_photo_path\" value=\"{}\">",
        record.id,
        escape(&record.photo)
    ));
    let current_photo = match photo_url {
        Some(url) => format!(
            "<img src=\"{}\" alt=\"الصورة الحالية\" style=\"max-width: 100px; max-height: 100px; \
             border-radius: 5px; margin: 10px auto; display: block;\">",
            escape(url)
        ),
        None => "<p style=\"text-align: center;\">لا يوجد</p>".to_string(),
    };
    body.push_str(&format!(
        "<div class=\"form-group\"><label>الصورة الحالية:</label>{current_photo}\
         <label for=\"pPhoto\" style=\"margin-top: 10px;\">تغيير الصورة (اختياري):</label>\
         <input type=\"file\" id=\"pPhoto\" name=\"playerPhoto\" accept=\"image/*\"></div>"
    ));
    body.push_str(&player_form_fields(Some(record)));
    body.push_str(
        "<button type=\"submit\" style=\"background: #28a745;\">تحديث البيانات</button></form>",
    );
    page(
        &format!("تعديل بيانات لاعب - {}", record.name),
        "",
        &body,
    )
}

pub fn duplicate_page(flags: &DuplicateFlags) -> String {
    let mut body = String::from(
        "<div class=\"card\" style=\"text-align: center; border: 2px solid red;\">\
         <h1>خطأ في التسجيل</h1>",
    );
    if flags.name {
        body.push_str(
            "<p style=\"font-size: 18px; color: red;\">هذا الاسم الثلاثي مسجل بالفعل من قبل.</p>",
        );
    }
    if flags.national_id {
        body.push_str(
            "<p style=\"font-size: 18px; color: red;\">الرقم القومي لهذا اللاعب مسجل بالفعل.</p>",
        );
    }
    if flags.phone {
        body.push_str(
            "<p style=\"font-size: 18px; color: red;\">رقم التليفون هذا مسجل باسم لاعب آخر (أب مختلف).</p>",
        );
    }
    body.push_str(
        "<br><a href=\"/register\" style=\"padding: 10px 20px; background: #8b4513; color: white; \
         text-decoration: none; border-radius: 5px;\">الرجوع لصفحة التسجيل</a></div>",
    );
    page("خطأ في التسجيل", "", &body)
}

pub fn success_page(code: &str, name: &str) -> String {
    let body = format!(
        "<div class=\"card\" style=\"text-align: center; border-top: 5px solid #28a745;\">\
         <h1 style=\"color: #28a745;\">✔ تم التسجيل بنجاح!</h1>\
         <p>مرحباً بك يا <strong>{name}</strong> في أكاديمية جولد ستار.</p>\
         <p>تم تسجيل بياناتك بنجاح. كود اللاعب الخاص بك هو:</p>\
         <span style=\"font-size: 28px; font-weight: bold; color: #8b4513; margin: 20px 0; \
         display: block; border: 2px dashed #ccc; padding: 15px; border-radius: 8px;\">{code}</span>\
         <p>برجاء الاحتفاظ بهذا الكود.</p>\
         <a href=\"/register\" style=\"display: inline-block; margin-top: 25px; padding: 12px 25px; \
         border-radius: 6px; background: #8b4513; color: white; font-weight: bold; \
         text-decoration: none;\">تسجيل لاعب جديد</a></div>",
        name = escape(name),
        code = escape(code),
    );
    page("تم التسجيل بنجاح!", "", &body)
}

/// Terminal user-facing error (invalid edit id, storage failure diagnostics).
pub fn error_page(message: &str) -> String {
    let body = format!(
        "<div class=\"card\" style=\"text-align: center; border: 2px solid red;\">\
         <h1>خطأ</h1><p style=\"font-size: 18px;\">{}</p>\
         <a href=\"/dashboard\" style=\"padding: 10px 20px; background: #6c757d; color: white; \
         text-decoration: none; border-radius: 5px;\">الرجوع إلى لوحة التحكم</a></div>",
        escape(message)
    );
    page("خطأ", "", &body)
}
